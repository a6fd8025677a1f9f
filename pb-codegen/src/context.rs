//! The context a plugin receives for one output file (spec §4.7): a
//! writer, an import tracker, the file's descriptor, and the shared
//! message graph. Owned exclusively by the currently running plugin for
//! the duration of its `generate` call (spec §5).

use crate::descriptor::FileDescriptor;
use crate::imports::ImportTracker;
use crate::message_graph::MessageGraph;
use crate::writer::Writer;

pub struct FileContext<'a> {
    pub file: &'a FileDescriptor,
    pub graph: &'a MessageGraph,
    pub writer: Writer,
    pub imports: ImportTracker,
}

impl<'a> FileContext<'a> {
    pub fn new(file: &'a FileDescriptor, graph: &'a MessageGraph) -> Self {
        FileContext {
            file,
            graph,
            writer: Writer::new(),
            imports: ImportTracker::new(),
        }
    }

    /// The fully qualified name (`.pkg.Outer.Inner`) for a message's own
    /// dotted path, suitable for [`MessageGraph`] lookups.
    pub fn fq_name(&self, dotted_path: &str) -> String {
        if self.file.package.is_empty() {
            format!(".{dotted_path}")
        } else {
            format!(".{}.{}", self.file.package, dotted_path)
        }
    }

    /// Renders the finished file: the import block followed by the
    /// writer's buffer.
    pub fn finish(self) -> String {
        let imports = self.imports.render();
        let body = self.writer.finish();
        if imports.is_empty() {
            body
        } else {
            format!("{imports}\n{body}")
        }
    }
}
