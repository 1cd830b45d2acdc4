//! AI systems (ECS-обвязка вокруг чистых автоматов)

pub mod fsm;

pub use fsm::*;
