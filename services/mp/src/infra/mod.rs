pub mod db;
pub mod wechat;
