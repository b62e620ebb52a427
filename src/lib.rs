//! Taskboard: multi-project task tracking with a guarded workflow engine.
//!
//! Projects namespace tasks, members take on work, and every recognised task
//! mutation leaves an entry in an append-only audit trail. The centre of the
//! crate is the task workflow engine: the `todo → in_progress → done` advance
//! state machine, the per-member admission limit on in-progress work, and the
//! audit entries that describe each change.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (memory, `PostgreSQL`, CSV)
//! - **Services**: Orchestration of domain rules over ports
//!
//! # Modules
//!
//! - [`member`]: Directory of assignable people
//! - [`project`]: Project registry keyed by unique upper-case keys
//! - [`task`]: Task workflow engine, admission control, statistics, CSV
//! - [`history`]: Audit trail recording and lookup
//! - [`tracker`]: Facade wiring every service over one store
//! - [`config`]: Environment-driven configuration
//! - [`telemetry`]: Tracing subscriber installation

pub mod config;
pub mod error;
pub mod history;
pub mod member;
pub mod postgres;
pub mod project;
pub mod task;
pub mod telemetry;
pub mod tracker;
