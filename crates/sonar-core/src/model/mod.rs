pub mod cell;
pub mod health;
pub mod observation;
pub mod side;
pub mod unit;
