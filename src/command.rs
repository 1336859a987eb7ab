//! Desktop commands and the request vocabulary shared by all components.
//!
//! [`DesktopCommand`] describes every external command the pager can ask
//! for.  Its [`Display`](fmt::Display) implementation *is* the wire format:
//! the exact shell string handed to whoever executes it (`qdbus` for KWin's
//! virtual desktop manager, `wmctrl` for window reassignment).  Nothing in
//! this crate runs these commands.
//!
//! [`Request`] / [`Response`] are the JSON vocabulary spoken by the
//! `vdpager` binary.  Numeric fields follow the widget's loose typing: any
//! JSON value is accepted and non-numbers become `NaN`, which every
//! operation treats as "not a number".

use crate::grid::{GridDimensions, PreviewSize, Rect, Scale};
use serde::de::{self, Deserializer, IgnoredAny, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Name given to a new desktop when none (or a blank one) is supplied.
pub const DEFAULT_DESKTOP_NAME: &str = "Desktop";

const KWIN_DESKTOP_MANAGER: &str = "qdbus org.kde.KWin /VirtualDesktopManager";

/// Escape `input` for embedding inside a single-quoted shell string.
///
/// Every `'` becomes `'\''` (close quote, escaped quote, reopen).
/// `None` yields an empty string.
pub fn escape_shell(input: Option<&str>) -> String {
    match input {
        Some(s) => s.replace('\'', r"'\''"),
        None => String::new(),
    }
}

/// Return the trimmed text if it has any non-whitespace content.
fn non_blank(input: Option<&str>) -> Option<&str> {
    input.map(str::trim).filter(|s| !s.is_empty())
}

/// A command for KWin's virtual desktop manager or for `wmctrl`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DesktopCommand {
    /// Remove the desktop with the given id.
    Remove { id: String },
    /// Rename a desktop.  `name` is stored trimmed but unescaped.
    Rename { id: String, name: String },
    /// Create a desktop at `position`.
    Create { position: u32, name: String },
    /// Move every window on desktop `a` to `b` and vice versa.
    SwapWindows { a: i64, b: i64 },
}

impl DesktopCommand {
    /// Build a remove command.  Returns `None` if `id` is missing or blank.
    ///
    /// The id is echoed verbatim (untrimmed); it is an opaque token.
    pub fn remove(id: Option<&str>) -> Option<Self> {
        non_blank(id)?;
        Some(Self::Remove {
            id: id?.to_string(),
        })
    }

    /// Build a rename command.  Returns `None` if either argument is missing
    /// or blank.
    pub fn rename(id: Option<&str>, new_name: Option<&str>) -> Option<Self> {
        non_blank(id)?;
        let name = non_blank(new_name)?;
        Some(Self::Rename {
            id: id?.to_string(),
            name: name.to_string(),
        })
    }

    /// Build a create command.  Never fails.
    ///
    /// `position` is floored and clamped to `0..=u32::MAX` (KWin takes an
    /// unsigned 32-bit position and appends past the last desktop); `NaN`
    /// and infinities become `0`.  A missing or blank `name` falls back to
    /// [`DEFAULT_DESKTOP_NAME`].
    pub fn create(position: f64, name: Option<&str>) -> Self {
        let position = if position.is_finite() {
            position.floor().clamp(0.0, u32::MAX as f64) as u32
        } else {
            0
        };
        Self::Create {
            position,
            name: non_blank(name).unwrap_or(DEFAULT_DESKTOP_NAME).to_string(),
        }
    }

    /// Build a window swap between desktops `a` and `b` (0-based).
    ///
    /// Both indices are floored.  Returns `None` if either is `NaN`,
    /// infinite or outside the `i64` range.  `a == b` is not rejected here;
    /// callers check [`can_swap`](crate::navigation::can_swap) first.
    pub fn swap_windows(a: f64, b: f64) -> Option<Self> {
        Some(Self::SwapWindows {
            a: floor_index(a)?,
            b: floor_index(b)?,
        })
    }
}

/// Floor `v` to an integer, rejecting values with no exact `i64` floor.
fn floor_index(v: f64) -> Option<i64> {
    let v = v.floor();
    // i64::MAX as f64 rounds up to 2^63, which is already out of range.
    if v.is_finite() && v >= i64::MIN as f64 && v < i64::MAX as f64 {
        Some(v as i64)
    } else {
        None
    }
}

impl fmt::Display for DesktopCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DesktopCommand::Remove { id } => {
                write!(f, "{} removeDesktop '{}'", KWIN_DESKTOP_MANAGER, id)
            }
            DesktopCommand::Rename { id, name } => write!(
                f,
                "{} setDesktopName '{}' '{}'",
                KWIN_DESKTOP_MANAGER,
                id,
                escape_shell(Some(name.as_str()))
            ),
            DesktopCommand::Create { position, name } => write!(
                f,
                "{} createDesktop {} '{}'",
                KWIN_DESKTOP_MANAGER,
                position,
                escape_shell(Some(name.as_str()))
            ),
            DesktopCommand::SwapWindows { a, b } => write!(
                f,
                "bash -c 'wins_a=$(wmctrl -l | awk \"\\$2=={a} {{print \\$1}}\"); \
                 wins_b=$(wmctrl -l | awk \"\\$2=={b} {{print \\$1}}\"); \
                 for w in $wins_a; do wmctrl -i -r $w -t {b}; done; \
                 for w in $wins_b; do wmctrl -i -r $w -t {a}; done'"
            ),
        }
    }
}

//  Wire types

/// A loosely typed number: JSON numbers pass through, anything else
/// (strings, booleans, null, objects) becomes `NaN`.
#[derive(Debug, Clone, Copy)]
pub struct Number(pub f64);

impl Default for Number {
    /// A missing field is not a number.
    fn default() -> Self {
        Number(f64::NAN)
    }
}

impl<'de> Deserialize<'de> for Number {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct V;
        impl<'de> Visitor<'de> for V {
            type Value = Number;
            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "any JSON value")
            }
            fn visit_i64<E>(self, n: i64) -> Result<Number, E> {
                Ok(Number(n as f64))
            }
            fn visit_u64<E>(self, n: u64) -> Result<Number, E> {
                Ok(Number(n as f64))
            }
            fn visit_f64<E>(self, n: f64) -> Result<Number, E> {
                Ok(Number(n))
            }
            fn visit_str<E>(self, _: &str) -> Result<Number, E> {
                Ok(Number::default())
            }
            fn visit_bool<E>(self, _: bool) -> Result<Number, E> {
                Ok(Number::default())
            }
            fn visit_unit<E>(self) -> Result<Number, E> {
                Ok(Number::default())
            }
            fn visit_seq<A>(self, mut seq: A) -> Result<Number, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                while seq.next_element::<IgnoredAny>()?.is_some() {}
                Ok(Number::default())
            }
            fn visit_map<A>(self, mut map: A) -> Result<Number, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
                Ok(Number::default())
            }
        }
        deserializer.deserialize_any(V)
    }
}

/// A request line that could not be parsed.
#[derive(Debug, Clone, thiserror::Error)]
#[error("bad request: {0}")]
pub struct BadRequest(pub String);

/// What a [`RequestSource`](crate::traits::RequestSource) delivers per line.
pub type Incoming = Result<Request, BadRequest>;

/// Accept any JSON value; only strings are kept.
fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(Some(s)),
        _ => Ok(None),
    }
}

/// Accept any JSON value for the drop-target items.
///
/// A non-array becomes `None` (no items at all); inside an array, any
/// entry that is not a complete rect becomes a `None` hole.
fn rects<'de, D>(deserializer: D) -> Result<Option<Vec<Option<Rect>>>, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Array(items) => Ok(Some(
            items
                .into_iter()
                .map(|item| serde_json::from_value::<Rect>(item).ok())
                .collect(),
        )),
        _ => Ok(None),
    }
}

/// Every question the pager can answer.
///
/// On the wire each request is one externally tagged JSON object, e.g.
/// `{"Rename":{"id":"abc","name":"Work"}}` or `{"Grid":{"count":5}}`.
#[derive(Debug, Clone, Deserialize)]
pub enum Request {
    Remove {
        #[serde(default, deserialize_with = "text")]
        id: Option<String>,
    },
    Rename {
        #[serde(default, deserialize_with = "text")]
        id: Option<String>,
        #[serde(default, deserialize_with = "text")]
        name: Option<String>,
    },
    Create {
        #[serde(default)]
        position: Number,
        #[serde(default, deserialize_with = "text")]
        name: Option<String>,
    },
    /// When `count` is present the swap must also pass
    /// [`can_swap`](crate::navigation::can_swap).
    SwapWindows {
        #[serde(default)]
        a: Number,
        #[serde(default)]
        b: Number,
        #[serde(default)]
        count: Option<Number>,
    },
    Grid {
        #[serde(default)]
        count: Number,
    },
    /// `width` defaults to the configured preview width.
    Preview {
        #[serde(default)]
        width: Option<Number>,
        #[serde(default)]
        screen_width: Number,
        #[serde(default)]
        screen_height: Number,
    },
    Next {
        #[serde(default)]
        current: Number,
        #[serde(default)]
        count: Number,
        #[serde(default)]
        direction: Number,
    },
    /// `threshold` defaults to the configured drag threshold.
    DragStarted {
        #[serde(default)]
        start_x: Number,
        #[serde(default)]
        start_y: Number,
        #[serde(default)]
        x: Number,
        #[serde(default)]
        y: Number,
        #[serde(default)]
        threshold: Option<Number>,
    },
    CanSwap {
        #[serde(default)]
        a: Number,
        #[serde(default)]
        b: Number,
        #[serde(default)]
        count: Number,
    },
    ValidIndex {
        #[serde(default)]
        index: Number,
        #[serde(default)]
        count: Number,
    },
    ValidName {
        #[serde(default, deserialize_with = "text")]
        name: Option<String>,
    },
    /// `items` are the preview rects in grid coordinates; `null` or
    /// malformed entries are items that are not laid out yet.
    DropTarget {
        #[serde(default)]
        x: Number,
        #[serde(default)]
        y: Number,
        #[serde(default, deserialize_with = "rects")]
        items: Option<Vec<Option<Rect>>>,
    },
}

/// Answer to a [`Request`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Response {
    Command(String),
    Grid(GridDimensions),
    Preview { size: PreviewSize, scale: Scale },
    Desktop(usize),
    Bool(bool),
    /// Index of the item under the point, `null` when none.
    Target(Option<usize>),
    Error(String),
}

impl fmt::Display for Response {
    /// Plain-text rendering used by the one-shot CLI.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Response::Command(cmd) => write!(f, "{}", cmd),
            Response::Grid(g) => write!(f, "{} {}", g.cols, g.rows),
            Response::Preview { size, scale } => write!(
                f,
                "{} {} {} {}",
                size.width, size.height, scale.x, scale.y
            ),
            Response::Desktop(n) => write!(f, "{}", n),
            Response::Bool(b) => write!(f, "{}", b),
            Response::Target(Some(n)) => write!(f, "{}", n),
            Response::Target(None) => write!(f, "-1"),
            Response::Error(e) => write!(f, "error: {}", e),
        }
    }
}
