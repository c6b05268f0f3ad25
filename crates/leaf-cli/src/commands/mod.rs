pub mod dispatch;
pub mod observation;
pub mod plant;
pub mod shared;
pub mod user;
