pub mod care;
pub mod dashboard;
pub mod designs;
pub mod fabric;
pub mod options;
pub mod production;
pub mod textiles;
