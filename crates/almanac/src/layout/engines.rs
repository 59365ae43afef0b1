//! Placement strategies, one per timeline style.
//!
//! Each strategy is a unit struct implementing [`StyleEngine`]. They share
//! no state, so a single instance serves every layout call.
//!
//! [`StyleEngine`]: super::StyleEngine

mod gantt;
mod horizontal;
mod infographic;
mod roadmap;
mod vertical;

pub use gantt::Gantt;
pub use horizontal::Horizontal;
pub use infographic::Infographic;
pub use roadmap::Roadmap;
pub use vertical::Vertical;
