//! Portal query core: session, pagination engine, normalizer, orchestrator.
//!
//! Control flow: [`orchestrator`] runs the [`engine`] once per supplied
//! call sign; the engine drives [`session`] page by page and feeds each
//! raw row through [`normalize`]; the orchestrator merges the per-leg
//! outcomes and classifies the aggregate result.

pub mod engine;
pub mod normalize;
pub mod orchestrator;
pub mod session;
