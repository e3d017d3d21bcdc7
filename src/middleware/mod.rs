/*
 * Responsibility
 * - middleware の公開インターフェース
 * - 各モジュールは `apply(router, ..)` の形で Router に層を足す
 */
pub mod auth;
pub mod cors;
pub mod http;
pub mod security_headers;
