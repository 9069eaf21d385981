pub mod chat;
pub mod health_detail;
pub mod home;
pub mod initial_balance;
pub mod login;
pub mod match_modal;
pub mod planned;
pub mod transactions;
