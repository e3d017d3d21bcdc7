/*
 * Responsibility
 * - ドメイン寄りのロジック (集計, ID 変換, 認証) をまとめる
 */
pub mod auth;
pub mod blog_stats;
pub mod id_codec;
