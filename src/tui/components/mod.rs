//! # TUI Components
//!
//! The persistent pieces of the shell that sit around the routed view.
//!
//! ## Component Architecture
//!
//! Components in this directory follow two patterns:
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Simple display components that receive all data as parameters:
//! - `TopNav`: product name, numbered links, current location
//! - `Footer`: key hints, status message, version
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that keep state between frames and emit events:
//! - `Overlay`: the modal slot, currently hosting the address bar
//!
//! Unlike views, components cannot fail to render. They live outside the
//! error boundary and stay on screen when the routed content has failed.
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs       (this file)
//! ├── top_nav.rs   (Navigation bar)
//! ├── overlay.rs   (Modal slot + address bar)
//! └── footer.rs    (Bottom bar)
//! ```

pub mod footer;
pub mod overlay;
pub mod top_nav;

pub use footer::Footer;
pub use overlay::Overlay;
pub use top_nav::TopNav;
