//! **vdpager** — helper logic for a virtual desktop pager.
//!
//! The pager widget lets a user view, rename, create, remove and rearrange
//! KWin virtual desktops and swap the windows assigned to them.  This crate
//! holds everything about that which is not UI:
//!
//! * [`command`] — builds the `qdbus` / `wmctrl` command strings and escapes
//!   names for single-quoted shell strings.
//! * [`grid`] — preview grid dimensions, thumbnail sizes and scale factors.
//! * [`navigation`] — wrap-around desktop navigation, validation guards and
//!   drag-and-drop helpers.
//!
//! Nothing here executes a command or touches a window manager.
//!
//! # Architecture
//!
//! Two traits keep the logic free of any toolkit or transport:
//!
//! * [`traits::DropTargetLookup`] — "which preview item is under this
//!   point?", answered by the UI harness (or [`navigation::ItemRects`]).
//! * [`traits::RequestSource`] — delivers [`command::Request`]s to the
//!   [`pager::Pager`], e.g. from stdin via [`ipc::stream::LineSource`].

pub mod command;
pub mod config;
pub mod grid;
pub mod ipc;
pub mod navigation;
pub mod pager;
pub mod traits;
