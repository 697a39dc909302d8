//! The read-only model of the dialogue games: arguments, attacks, framework states and properties.

mod aa_framework;
pub use aa_framework::AAFramework;
pub use aa_framework::Argument;
pub use aa_framework::ArgumentSet;
pub use aa_framework::Attack;

mod framework_states;
pub use framework_states::FrameworkState;
pub use framework_states::FrameworkStates;

mod model;
pub use model::ArgumentationModel;
pub use model::InvalidModel;
pub use model::ModelBuilder;

mod properties;
pub use properties::Property;
pub use properties::PropertyModel;
