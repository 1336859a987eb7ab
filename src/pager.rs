//! The orchestrator that answers [`Request`]s.
//!
//! [`Pager`] holds the [`Config`] and maps each request onto the pure
//! functions in [`command`](crate::command), [`grid`](crate::grid) and
//! [`navigation`](crate::navigation).  It never executes the commands it
//! builds; the caller hands them to whatever runs shell commands.

use crate::command::{DesktopCommand, Request, Response};
use crate::config::Config;
use crate::grid::{calculate_grid, calculate_scale, preview_size};
use crate::navigation::{
    can_swap, find_drop_target, is_drag_started, is_valid_index, is_valid_name, next_desktop,
    ItemRects,
};
use log::{debug, info};

/// Possible errors from the pager.
#[derive(Debug, thiserror::Error)]
pub enum PagerError {
    /// A command could not be built from the request's arguments.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Answers pager requests using the configured defaults.
#[derive(Debug, Clone, Default)]
pub struct Pager {
    config: Config,
}

impl Pager {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Process a single [`Request`].
    ///
    /// Command requests with unusable arguments fail with
    /// [`PagerError::InvalidInput`]; every other request always produces a
    /// [`Response`].
    pub fn handle(&self, request: Request) -> Result<Response, PagerError> {
        match request {
            Request::Remove { id } => {
                info!("remove desktop {:?}", id);
                let cmd = DesktopCommand::remove(id.as_deref()).ok_or_else(|| {
                    PagerError::InvalidInput("remove needs a non-blank desktop id".into())
                })?;
                Ok(Response::Command(cmd.to_string()))
            }

            Request::Rename { id, name } => {
                info!("rename desktop {:?} to {:?}", id, name);
                let cmd = DesktopCommand::rename(id.as_deref(), name.as_deref()).ok_or_else(|| {
                    PagerError::InvalidInput("rename needs a non-blank desktop id and name".into())
                })?;
                Ok(Response::Command(cmd.to_string()))
            }

            Request::Create { position, name } => {
                info!("create desktop at {} named {:?}", position.0, name);
                let cmd = DesktopCommand::create(position.0, name.as_deref());
                Ok(Response::Command(cmd.to_string()))
            }

            Request::SwapWindows { a, b, count } => {
                info!("swap windows between desktops {} and {}", a.0, b.0);
                if let Some(count) = count {
                    if !can_swap(a.0, b.0, count.0) {
                        return Err(PagerError::InvalidInput(format!(
                            "cannot swap desktops {} and {} out of {}",
                            a.0, b.0, count.0
                        )));
                    }
                }
                let cmd = DesktopCommand::swap_windows(a.0, b.0).ok_or_else(|| {
                    PagerError::InvalidInput(format!(
                        "swap needs two finite desktop indices, got {} and {}",
                        a.0, b.0
                    ))
                })?;
                Ok(Response::Command(cmd.to_string()))
            }

            Request::Grid { count } => {
                let grid = calculate_grid(count.0);
                debug!("grid for {} desktops: {}x{}", count.0, grid.cols, grid.rows);
                Ok(Response::Grid(grid))
            }

            Request::Preview {
                width,
                screen_width,
                screen_height,
            } => {
                let width = width.map_or(self.config.preview.width, |w| w.0);
                let size = preview_size(width, screen_width.0, screen_height.0);
                let scale = calculate_scale(size.width, size.height, screen_width.0, screen_height.0);
                debug!("preview {}x{} scale {:?}", size.width, size.height, scale);
                Ok(Response::Preview { size, scale })
            }

            Request::Next {
                current,
                count,
                direction,
            } => {
                let next = next_desktop(current.0, count.0, direction.0);
                debug!("next desktop from {}: {}", current.0, next);
                Ok(Response::Desktop(next))
            }

            Request::DragStarted {
                start_x,
                start_y,
                x,
                y,
                threshold,
            } => {
                let threshold = threshold.map_or(self.config.drag.threshold, |t| t.0);
                Ok(Response::Bool(is_drag_started(
                    start_x.0,
                    start_y.0,
                    x.0,
                    y.0,
                    Some(threshold),
                )))
            }

            Request::CanSwap { a, b, count } => Ok(Response::Bool(can_swap(a.0, b.0, count.0))),

            Request::ValidIndex { index, count } => {
                Ok(Response::Bool(is_valid_index(index.0, count.0)))
            }

            Request::ValidName { name } => Ok(Response::Bool(is_valid_name(name.as_deref()))),

            Request::DropTarget { x, y, items } => {
                let rects = items.map(ItemRects::new);
                if let Some(r) = &rects {
                    debug!("drop target lookup over {} item(s)", r.len());
                }
                Ok(Response::Target(find_drop_target(rects.as_ref(), x.0, y.0)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridDimensions;

    fn handle(json: &str) -> Result<Response, PagerError> {
        let request: Request = serde_json::from_str(json).expect("valid request json");
        Pager::default().handle(request)
    }

    fn command(json: &str) -> String {
        match handle(json) {
            Ok(Response::Command(cmd)) => cmd,
            other => panic!("expected a command, got {:?}", other),
        }
    }

    fn boolean(json: &str) -> bool {
        match handle(json) {
            Ok(Response::Bool(b)) => b,
            other => panic!("expected a bool, got {:?}", other),
        }
    }

    #[test]
    fn remove_builds_command() {
        assert_eq!(
            command(r#"{"Remove":{"id":"abc-123"}}"#),
            "qdbus org.kde.KWin /VirtualDesktopManager removeDesktop 'abc-123'"
        );
    }

    #[test]
    fn remove_without_id_is_invalid() {
        assert!(matches!(
            handle(r#"{"Remove":{"id":"  "}}"#),
            Err(PagerError::InvalidInput(_))
        ));
        assert!(matches!(
            handle(r#"{"Remove":{"id":null}}"#),
            Err(PagerError::InvalidInput(_))
        ));
    }

    #[test]
    fn rename_escapes_name() {
        let cmd = command(r#"{"Rename":{"id":"id1","name":" it's "}}"#);
        assert!(cmd.ends_with(r"setDesktopName 'id1' 'it'\''s'"));
    }

    #[test]
    fn rename_with_blank_name_is_invalid() {
        assert!(handle(r#"{"Rename":{"id":"id1","name":""}}"#).is_err());
    }

    #[test]
    fn create_with_defaults() {
        assert_eq!(
            command(r#"{"Create":{}}"#),
            "qdbus org.kde.KWin /VirtualDesktopManager createDesktop 0 'Desktop'"
        );
        assert!(command(r#"{"Create":{"position":3.8,"name":"Mail"}}"#)
            .ends_with("createDesktop 3 'Mail'"));
    }

    #[test]
    fn create_with_out_of_range_position() {
        assert!(command(r#"{"Create":{"position":1e300}}"#)
            .ends_with("createDesktop 4294967295 'Desktop'"));
        assert!(command(r#"{"Create":{"position":"3"}}"#).ends_with("createDesktop 0 'Desktop'"));
    }

    #[test]
    fn swap_checks_count_when_given() {
        let cmd = command(r#"{"SwapWindows":{"a":0,"b":2}}"#);
        assert!(cmd.starts_with("bash -c '"));
        assert!(cmd.contains("wmctrl -i -r $w -t 2"));

        assert!(handle(r#"{"SwapWindows":{"a":1,"b":1}}"#).is_ok());
        assert!(handle(r#"{"SwapWindows":{"a":1,"b":1,"count":5}}"#).is_err());
        assert!(handle(r#"{"SwapWindows":{"a":0,"b":5,"count":5}}"#).is_err());
        assert!(handle(r#"{"SwapWindows":{"a":0,"b":4,"count":5}}"#).is_ok());
    }

    #[test]
    fn swap_with_non_numeric_index_is_invalid() {
        assert!(matches!(
            handle(r#"{"SwapWindows":{"a":"oops","b":1}}"#),
            Err(PagerError::InvalidInput(_))
        ));
        assert!(matches!(
            handle(r#"{"SwapWindows":{"b":1}}"#),
            Err(PagerError::InvalidInput(_))
        ));
        assert!(matches!(
            handle(r#"{"SwapWindows":{"a":1e300,"b":1}}"#),
            Err(PagerError::InvalidInput(_))
        ));
    }

    #[test]
    fn grid_request() {
        assert_eq!(
            handle(r#"{"Grid":{"count":5}}"#).unwrap(),
            Response::Grid(GridDimensions { cols: 3, rows: 2 })
        );
        assert_eq!(
            handle(r#"{"Grid":{"count":"many"}}"#).unwrap(),
            Response::Grid(GridDimensions { cols: 1, rows: 1 })
        );
    }

    #[test]
    fn preview_uses_configured_width() {
        match handle(r#"{"Preview":{"screen_width":1920,"screen_height":1080}}"#).unwrap() {
            Response::Preview { size, scale } => {
                assert_eq!(size.width, 160.0);
                assert!((size.height - 90.0).abs() < 0.01);
                assert!((scale.x - 160.0 / 1920.0).abs() < 1e-9);
                assert!((scale.y - 90.0 / 1080.0).abs() < 1e-9);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn preview_with_explicit_width() {
        match handle(r#"{"Preview":{"width":320,"screen_width":0,"screen_height":0}}"#).unwrap() {
            Response::Preview { size, .. } => {
                assert_eq!(size.width, 320.0);
                assert!((size.height - 180.0).abs() < 0.01);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn next_request_wraps() {
        assert_eq!(
            handle(r#"{"Next":{"current":4,"count":5,"direction":1}}"#).unwrap(),
            Response::Desktop(0)
        );
        assert_eq!(
            handle(r#"{"Next":{"current":0,"count":5,"direction":-1}}"#).unwrap(),
            Response::Desktop(4)
        );
    }

    #[test]
    fn drag_uses_configured_threshold() {
        assert!(!boolean(r#"{"DragStarted":{"start_x":0,"start_y":0,"x":10,"y":0}}"#));
        assert!(boolean(r#"{"DragStarted":{"start_x":0,"start_y":0,"x":15,"y":0}}"#));

        let mut config = Config::default();
        config.drag.threshold = 20.0;
        let pager = Pager::new(config);
        let request: Request =
            serde_json::from_str(r#"{"DragStarted":{"start_x":0,"start_y":0,"x":15,"y":0}}"#).unwrap();
        assert_eq!(pager.handle(request).unwrap(), Response::Bool(false));
    }

    #[test]
    fn guard_requests() {
        assert!(boolean(r#"{"CanSwap":{"a":0,"b":4,"count":5}}"#));
        assert!(!boolean(r#"{"CanSwap":{"a":"0","b":4,"count":5}}"#));
        assert!(!boolean(r#"{"ValidIndex":{"index":1.5,"count":5}}"#));
        assert!(boolean(r#"{"ValidIndex":{"index":4,"count":5}}"#));
        assert!(boolean(r#"{"ValidName":{"name":"Work"}}"#));
        assert!(!boolean(r#"{"ValidName":{"name":42}}"#));
    }

    #[test]
    fn drop_target_request() {
        let items = r#"[{"x":0,"y":0,"width":100,"height":50},{"x":110,"y":0,"width":100,"height":50}]"#;
        assert_eq!(
            handle(&format!(r#"{{"DropTarget":{{"x":150,"y":10,"items":{}}}}}"#, items)).unwrap(),
            Response::Target(Some(1))
        );
        assert_eq!(
            handle(&format!(r#"{{"DropTarget":{{"x":105,"y":10,"items":{}}}}}"#, items)).unwrap(),
            Response::Target(None)
        );
        assert_eq!(
            handle(r#"{"DropTarget":{"x":5,"y":5}}"#).unwrap(),
            Response::Target(None)
        );
    }

    #[test]
    fn malformed_drop_target_items_are_not_found() {
        assert_eq!(
            handle(r#"{"DropTarget":{"x":5,"y":5,"items":[{"x":0,"y":0}]}}"#).unwrap(),
            Response::Target(None)
        );
        assert_eq!(
            handle(r#"{"DropTarget":{"x":5,"y":5,"items":"nope"}}"#).unwrap(),
            Response::Target(None)
        );
        assert_eq!(
            handle(r#"{"DropTarget":{"x":15,"y":5,"items":[{"x":0},{"x":10,"y":0,"width":10,"height":10}]}}"#)
                .unwrap(),
            Response::Target(Some(1))
        );
    }
}
