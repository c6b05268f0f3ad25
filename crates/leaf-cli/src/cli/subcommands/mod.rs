mod observation;
mod plant;
mod user;

pub use observation::ObservationCommands;
pub use plant::PlantCommands;
pub use user::UserCommands;
