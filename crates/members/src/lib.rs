//! # memberhub Members Crate
//!
//! The three demo workflows and the seams they run through.
//!
//! ## Architecture
//!
//! - **Model**: members, profiles, legacy records and bus events
//! - **Ports**: traits over the relational store, document store, event bus and fact source
//! - **Adapters**: port implementations over PostgreSQL, MongoDB, Kafka and HTTP
//! - **Services**: login, authenticate and member lookup-or-create
//! - **Simulation**: the random parts (ids, names, injected rejections)

pub mod adapters;
pub mod error;
pub mod facts;
pub mod memory;
pub mod metrics;
pub mod model;
pub mod ports;
pub mod services;
pub mod simulation;

pub use error::{MemberError, MemberResult};
pub use facts::{HttpFactSource, NoFacts};
pub use metrics::MemberMetrics;
pub use model::{LegacyMemberRecord, Member, MemberEvent, MemberLookup, MemberProfile};
pub use ports::{EventPublisher, FactSource, LegacyStore, MemberStore};
pub use services::{
    AuthOutcome, AuthenticationResponse, AuthenticationService, LoginResponse, LoginService,
    MemberService,
};
pub use simulation::Simulation;
