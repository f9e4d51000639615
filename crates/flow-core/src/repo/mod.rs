mod types;

pub use types::{FlowDefinition, FlowInstance, FlowRepository, InMemoryFlowRepository, StepSlot};
