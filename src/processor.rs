//! File-level orchestration
//!
//! [`CollisionProcessor`] ties the pieces together: the accumulator splits
//! the input into runs, every group of a run is built into a mesh, pushed
//! through the simplification pipeline on the editor and flattened back
//! into `TRI` lines at the place the run started.

use crate::config::{GroupFailurePolicy, ProcessorConfig};
use crate::observer::{ProcessObserver, TracingObserver};
use colcrate_core::{Drawable, Result, TriangleRecord};
use colcrate_io::{format_record, read_lines, FileRewriter, Flush, Group, GroupAccumulator, Step};
use colcrate_simplification::{build_mesh, flatten, MeshEditor, SimplificationPipeline};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Counters collected over one processed input
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProcessReport {
    pub control_lines: usize,
    pub flushes: usize,
    pub groups: usize,
    pub groups_failed: usize,
    pub triangles_in: usize,
    pub triangles_out: usize,
}

impl fmt::Display for ProcessReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} groups in {} runs ({} failed), {} -> {} triangles, {} control lines",
            self.groups,
            self.flushes,
            self.groups_failed,
            self.triangles_in,
            self.triangles_out,
            self.control_lines
        )
    }
}

/// Rewrites collision files group by group on one mesh editor
pub struct CollisionProcessor<E: MeshEditor, O: ProcessObserver = TracingObserver> {
    editor: E,
    observer: O,
    config: ProcessorConfig,
    pipeline: SimplificationPipeline,
}

impl<E: MeshEditor> CollisionProcessor<E, TracingObserver> {
    pub fn new(editor: E, config: ProcessorConfig) -> Self {
        Self::with_observer(editor, TracingObserver, config)
    }
}

impl<E: MeshEditor, O: ProcessObserver> CollisionProcessor<E, O> {
    pub fn with_observer(editor: E, observer: O, config: ProcessorConfig) -> Self {
        let pipeline = SimplificationPipeline::new(config.params);
        Self {
            editor,
            observer,
            config,
            pipeline,
        }
    }

    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    pub fn editor(&self) -> &E {
        &self.editor
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn into_parts(self) -> (E, O) {
        (self.editor, self.observer)
    }

    /// Process a whole document held in memory.
    ///
    /// Returns the output lines without indentation; the rewriter applies
    /// it when writing.
    pub fn process_str(&mut self, text: &str) -> Result<(Vec<String>, ProcessReport)> {
        self.process_lines(text.lines())
    }

    /// Process a file and write the result next to it.
    ///
    /// The output goes to the input path with the configured suffix
    /// appended. Returns that path and the report.
    pub fn process_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(PathBuf, ProcessReport)> {
        let path = path.as_ref();
        let input = read_lines(path)?;
        let (lines, report) = self.process_lines(&input)?;
        let output = FileRewriter::write_sibling(&lines, path, &self.config.output_suffix)?;
        info!(
            input = %path.display(),
            output = %output.display(),
            groups = report.groups,
            failed = report.groups_failed,
            "collision file rewritten"
        );
        Ok((output, report))
    }

    /// Process a sequence of input lines.
    pub fn process_lines<I, S>(&mut self, lines: I) -> Result<(Vec<String>, ProcessReport)>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut accumulator = GroupAccumulator::new(self.config.key_presence);
        let mut out = Vec::new();
        let mut report = ProcessReport::default();

        for line in lines {
            match accumulator.push_line(line.as_ref())? {
                Step::Collected { ambiguous_key } => {
                    if ambiguous_key {
                        self.observer
                            .on_ambiguous_key_presence(accumulator.line_number());
                    }
                }
                Step::Control { flush, line } => {
                    if let Some(flush) = flush {
                        self.emit_flush(flush, &mut out, &mut report)?;
                    }
                    self.observer.on_control_line(accumulator.line_number(), &line);
                    report.control_lines += 1;
                    out.push(line);
                }
            }
        }
        if let Some(flush) = accumulator.finish() {
            self.emit_flush(flush, &mut out, &mut report)?;
        }
        self.editor.clear_all();

        Ok((out, report))
    }

    fn emit_flush(&mut self, flush: Flush, out: &mut Vec<String>, report: &mut ProcessReport) -> Result<()> {
        report.flushes += 1;
        for group in flush.groups {
            report.groups += 1;
            report.triangles_in += group.len();

            let simplified = self.simplify_group(&group);
            self.editor.clear_all();

            match simplified {
                Ok(records) => {
                    self.observer
                        .on_group_simplified(group.key, group.len(), records.len());
                    report.triangles_out += records.len();
                    out.extend(records.iter().map(format_record));
                }
                Err(error) if error.is_group_local() => {
                    let (min, max) = group.records.bounding_box();
                    debug!(key = group.key.0, ?min, ?max, "extent of failed group");
                    self.observer.on_group_failed(group.key, &error);
                    report.groups_failed += 1;
                    if self.config.failure_policy == GroupFailurePolicy::PassThrough {
                        report.triangles_out += group.len();
                        out.extend(group.source);
                    }
                }
                Err(error) => return Err(error),
            }
        }
        Ok(())
    }

    fn simplify_group(&mut self, group: &Group) -> Result<Vec<TriangleRecord>> {
        let mesh = build_mesh(&group.records);
        let faces = self.pipeline.run(&mut self.editor, &mesh)?;
        flatten(&faces, group.key, group.keyed)
    }
}
