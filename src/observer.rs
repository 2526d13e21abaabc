//! Progress hooks for file processing

use colcrate_core::{CollisionKey, Error};
use tracing::{debug, info, warn};

/// Callbacks fired while a collision file is processed.
///
/// All methods default to doing nothing.
pub trait ProcessObserver {
    /// A structural line was passed through. `line_no` is 1-based.
    fn on_control_line(&mut self, _line_no: usize, _line: &str) {}

    /// A group was simplified from `triangles_in` to `triangles_out` triangles.
    fn on_group_simplified(&mut self, _key: CollisionKey, _triangles_in: usize, _triangles_out: usize) {}

    /// Simplification of a group failed; the file continues.
    fn on_group_failed(&mut self, _key: CollisionKey, _error: &Error) {}

    /// A line carried key tokens inside a run that ignores them.
    fn on_ambiguous_key_presence(&mut self, _line_no: usize) {}
}

/// Forwards every event to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl ProcessObserver for TracingObserver {
    fn on_control_line(&mut self, line_no: usize, line: &str) {
        info!(line = line_no, "{line}");
    }

    fn on_group_simplified(&mut self, key: CollisionKey, triangles_in: usize, triangles_out: usize) {
        debug!(key = key.0, triangles_in, triangles_out, "group simplified");
    }

    fn on_group_failed(&mut self, key: CollisionKey, error: &Error) {
        warn!(key = key.0, %error, "group simplification failed");
    }

    fn on_ambiguous_key_presence(&mut self, line_no: usize) {
        warn!(line = line_no, "key tokens ignored in an unkeyed run");
    }
}

impl<O: ProcessObserver + ?Sized> ProcessObserver for &mut O {
    fn on_control_line(&mut self, line_no: usize, line: &str) {
        (**self).on_control_line(line_no, line)
    }

    fn on_group_simplified(&mut self, key: CollisionKey, triangles_in: usize, triangles_out: usize) {
        (**self).on_group_simplified(key, triangles_in, triangles_out)
    }

    fn on_group_failed(&mut self, key: CollisionKey, error: &Error) {
        (**self).on_group_failed(key, error)
    }

    fn on_ambiguous_key_presence(&mut self, line_no: usize) {
        (**self).on_ambiguous_key_presence(line_no)
    }
}
