//! Grouping of consecutive triangle lines by collision-type key
//!
//! The accumulator walks the input one line at a time. Triangle lines are
//! collected into per-key batches; the first non-triangle line after a run
//! (or the end of input) flushes every batch of that run at once.
//!
//! Whether a run carries key tokens is decided by the first triangle line of
//! the run and then applied to the rest of it. [`KeyPresence`] controls what
//! happens when a later line disagrees.

use crate::tri::{is_triangle_line, parse_record};
use colcrate_core::{CollisionKey, Error, Result, TriangleRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::mem;

/// Policy for runs whose lines disagree about key tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyPresence {
    /// Keys are ignored on lines of an unkeyed run (reported as ambiguous);
    /// a keyed run rejects lines without keys.
    #[default]
    Legacy,
    /// Every line of a run must agree with the first one.
    Strict,
}

/// Triangles of one run sharing one key
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub key: CollisionKey,
    /// Whether the run this group came from carried key tokens
    pub keyed: bool,
    pub records: Vec<TriangleRecord>,
    /// Trimmed source lines, parallel to `records`
    pub source: Vec<String>,
}

impl Group {
    fn new(key: CollisionKey, keyed: bool) -> Self {
        Self {
            key,
            keyed,
            records: Vec::new(),
            source: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// All groups of one run, in the order their first triangle appeared
#[derive(Debug, Clone, PartialEq)]
pub struct Flush {
    pub groups: Vec<Group>,
}

impl Flush {
    pub fn triangle_count(&self) -> usize {
        self.groups.iter().map(Group::len).sum()
    }
}

/// Outcome of feeding one line
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// The line was a triangle and joined its batch. `ambiguous_key` is set
    /// when the line carried keys the run ignores.
    Collected { ambiguous_key: bool },
    /// A non-triangle line. `flush` holds the run it terminated, if any.
    Control { flush: Option<Flush>, line: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    Collecting { keyed: bool },
}

/// Stateful splitter of a line stream into runs of triangle batches
#[derive(Debug)]
pub struct GroupAccumulator {
    policy: KeyPresence,
    state: State,
    groups: Vec<Group>,
    index: HashMap<CollisionKey, usize>,
    line_no: usize,
}

impl Default for GroupAccumulator {
    fn default() -> Self {
        Self::new(KeyPresence::default())
    }
}

impl GroupAccumulator {
    pub fn new(policy: KeyPresence) -> Self {
        Self {
            policy,
            state: State::Idle,
            groups: Vec::new(),
            index: HashMap::new(),
            line_no: 0,
        }
    }

    /// Number of lines consumed so far
    pub fn line_number(&self) -> usize {
        self.line_no
    }

    pub fn is_collecting(&self) -> bool {
        matches!(self.state, State::Collecting { .. })
    }

    /// Feed the next input line.
    pub fn push_line(&mut self, raw: &str) -> Result<Step> {
        self.line_no += 1;
        let line = raw.trim();

        if !is_triangle_line(line) {
            return Ok(Step::Control {
                flush: self.take_flush(),
                line: line.to_string(),
            });
        }

        let record = parse_record(line).map_err(|e| e.at_line(self.line_no))?;
        let keyed = match self.state {
            State::Collecting { keyed } => keyed,
            State::Idle => {
                let keyed = record.has_key();
                self.state = State::Collecting { keyed };
                keyed
            }
        };

        let (record, ambiguous_key) = match (keyed, record.has_key()) {
            (true, true) | (false, false) => (record, false),
            (true, false) => {
                return Err(Error::MalformedRecord {
                    line: self.line_no,
                    reason: "missing key tokens in a keyed run".to_string(),
                });
            }
            (false, true) => match self.policy {
                KeyPresence::Legacy => (record.without_key(), true),
                KeyPresence::Strict => {
                    return Err(Error::MalformedRecord {
                        line: self.line_no,
                        reason: "unexpected key tokens in an unkeyed run".to_string(),
                    });
                }
            },
        };

        let key = record.group_key();
        let slot = match self.index.get(&key) {
            Some(&slot) => slot,
            None => {
                self.groups.push(Group::new(key, keyed));
                self.index.insert(key, self.groups.len() - 1);
                self.groups.len() - 1
            }
        };
        let group = &mut self.groups[slot];
        group.records.push(record);
        group.source.push(line.to_string());

        Ok(Step::Collected { ambiguous_key })
    }

    /// Signal end of input, flushing a pending run.
    pub fn finish(&mut self) -> Option<Flush> {
        self.take_flush()
    }

    fn take_flush(&mut self) -> Option<Flush> {
        if !self.is_collecting() {
            return None;
        }
        self.state = State::Idle;
        self.index.clear();
        Some(Flush {
            groups: mem::take(&mut self.groups),
        })
    }
}
