//! Generation driver
//!
//! Runs the pipes in a fixed order over the previous output (or the project
//! skeleton) and writes the result back atomically. A pass either succeeds
//! completely or leaves the file on disk as it was.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::lint::LintWarning;
use crate::model::Design;
use crate::template::TemplateStore;
use crate::GenerateError;

use super::pipes::{BlockPipe, CallbackPipe, PassContext, Pipe};

const SKELETON: &str = include_str!("../../templates/skeleton.ino");

/// The bundled project skeleton used for a first generation
pub fn builtin_skeleton() -> &'static str {
    SKELETON
}

/// The pipes every project runs, in execution order
pub fn standard_pipes() -> Vec<Box<dyn Pipe>> {
    vec![
        Box::new(BlockPipe::enums()),
        Box::new(BlockPipe::element_refs()),
        Box::new(CallbackPipe::checkbox()),
        Box::new(CallbackPipe::button()),
        Box::new(BlockPipe::init_gui()),
    ]
}

/// Output of a successful pass
#[derive(Debug, Clone, PartialEq)]
pub struct Generated {
    pub text: String,
    pub warnings: Vec<LintWarning>,
}

/// How `generate_file` treats the file on disk
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputOptions {
    /// Keep the previous file as `<output>.bak`
    pub backup: bool,
    /// Compute the result without writing anything
    pub dry_run: bool,
}

impl OutputOptions {
    pub fn with_backup(mut self, backup: bool) -> Self {
        self.backup = backup;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

pub struct Generator<'a> {
    store: &'a TemplateStore,
    design: &'a Design,
    pipes: Vec<Box<dyn Pipe>>,
}

impl<'a> Generator<'a> {
    pub fn new(store: &'a TemplateStore, design: &'a Design) -> Self {
        Self {
            store,
            design,
            pipes: standard_pipes(),
        }
    }

    /// Replace the pipe list
    pub fn with_pipes(mut self, pipes: Vec<Box<dyn Pipe>>) -> Self {
        self.pipes = pipes;
        self
    }

    /// Run every pipe over `source`.
    ///
    /// Warnings are only handed back when the whole pass succeeds; the first
    /// error aborts it.
    pub fn generate(&self, source: &str) -> Result<Generated, GenerateError> {
        // ids that are not identifiers could not be found again in the output
        self.design.validate()?;

        // Report marker problems against the text as given, before any pipe
        // shifts its lines
        for pipe in &self.pipes {
            pipe.check(source)?;
        }

        let mut ctx = PassContext::new(self.design, self.store);
        let mut text = source.to_string();
        for pipe in &self.pipes {
            debug!(tag = pipe.tag().name(), "running pipe");
            text = pipe.process(&text, &mut ctx)?;
        }
        Ok(Generated {
            text,
            warnings: ctx.emitter.into_warnings(),
        })
    }

    /// Regenerate `output` in place, starting from `skeleton` (or the
    /// bundled one) when it does not exist yet
    pub fn generate_file(
        &self,
        output: &Path,
        skeleton: Option<&Path>,
        options: OutputOptions,
    ) -> Result<Generated, GenerateError> {
        let source = load_source(output, skeleton)?;
        let generated = self.generate(&source)?;
        if options.dry_run {
            debug!(path = %output.display(), "dry run, nothing written");
        } else {
            write_output(output, &generated.text, options)?;
        }
        Ok(generated)
    }
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> GenerateError + '_ {
    move |source| GenerateError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// `path` with `suffix` appended to its file name
fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(suffix);
    path.with_file_name(name)
}

/// Text to start a pass from: the previous output if present, otherwise
/// the skeleton
pub fn load_source(output: &Path, skeleton: Option<&Path>) -> Result<String, GenerateError> {
    match fs::read_to_string(output) {
        Ok(text) => {
            debug!(path = %output.display(), "regenerating existing output");
            return Ok(text);
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(io_error(output)(e)),
    }
    match skeleton {
        Some(path) => {
            debug!(path = %path.display(), "starting from project skeleton");
            fs::read_to_string(path).map_err(io_error(path))
        }
        None => {
            debug!("starting from bundled skeleton");
            Ok(SKELETON.to_string())
        }
    }
}

/// Write `text` to `<output>.tmp`, then rename it over `output`
pub fn write_output(output: &Path, text: &str, options: OutputOptions) -> Result<(), GenerateError> {
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error(parent))?;
    }

    let temp = sibling(output, ".tmp");
    fs::write(&temp, text).map_err(io_error(&temp))?;

    if options.backup && output.exists() {
        let backup = sibling(output, ".bak");
        fs::copy(output, &backup).map_err(io_error(&backup))?;
        debug!(path = %backup.display(), "kept backup");
    }

    fs::rename(&temp, output).map_err(io_error(output))?;
    info!(path = %output.display(), bytes = text.len(), "wrote generated file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CheckBox, Page};
    use pretty_assertions::assert_eq;

    fn design() -> Design {
        Design::new().with_page(
            Page::new("E_PG_MAIN").with_widget(CheckBox::new("E_CHECK1").with_callback(true)),
        )
    }

    #[test]
    fn test_standard_pipe_order() {
        let tags: Vec<String> = standard_pipes()
            .iter()
            .map(|p| p.tag().name().to_string())
            .collect();
        assert_eq!(
            tags,
            vec!["Enum", "Save_References", "Checkbox Callback", "Button Callback", "InitGUI"]
        );
    }

    #[test]
    fn test_bundled_skeleton_has_every_tag() {
        for pipe in standard_pipes() {
            assert!(SKELETON.contains(pipe.tag().start()));
            assert!(SKELETON.contains(pipe.tag().end()));
        }
    }

    #[test]
    fn test_custom_pipe_list() {
        let store = TemplateStore::builtin();
        let design = design();
        let generator =
            Generator::new(&store, &design).with_pipes(vec![Box::new(BlockPipe::enums())]);
        let out = generator.generate(SKELETON).unwrap();
        assert!(out.text.contains("enum {E_PG_MAIN,E_CHECK1};"));
        assert!(!out.text.contains("CbCheckbox"));
    }

    #[test]
    fn test_error_discards_partial_pass() {
        let store = TemplateStore::from_str("<ENUM_LIST>\nenum {$<ENUMS>};\n<STOP>\n").unwrap();
        let design = design();
        let err = Generator::new(&store, &design).generate(SKELETON).unwrap_err();
        assert!(matches!(err, GenerateError::Template(_)));
    }

    #[test]
    fn test_invalid_enum_id_rejected_before_writing() {
        let store = TemplateStore::builtin();
        let design = Design::new()
            .with_page(Page::new("E_PG_MAIN").with_widget(CheckBox::new("E-A").with_callback(true)));
        let err = Generator::new(&store, &design).generate(SKELETON).unwrap_err();
        assert!(matches!(
            err,
            GenerateError::Design(crate::model::DesignError::InvalidEnum(ref id)) if id == "E-A"
        ));
    }

    #[test]
    fn test_sibling_paths() {
        let p = Path::new("/tmp/out/gui.ino");
        assert_eq!(sibling(p, ".tmp"), PathBuf::from("/tmp/out/gui.ino.tmp"));
        assert_eq!(sibling(p, ".bak"), PathBuf::from("/tmp/out/gui.ino.bak"));
    }

    #[test]
    fn test_load_source_prefers_previous_output() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("gui.ino");
        let skeleton = dir.path().join("skel.ino");
        fs::write(&skeleton, "skeleton\n").unwrap();

        assert_eq!(load_source(&output, None).unwrap(), SKELETON);
        assert_eq!(load_source(&output, Some(skeleton.as_path())).unwrap(), "skeleton\n");

        fs::write(&output, "previous\n").unwrap();
        assert_eq!(load_source(&output, Some(skeleton.as_path())).unwrap(), "previous\n");
    }

    #[test]
    fn test_missing_skeleton_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("gui.ino");
        let skeleton = dir.path().join("missing.ino");
        let err = load_source(&output, Some(skeleton.as_path())).unwrap_err();
        assert!(matches!(err, GenerateError::Io { ref path, .. } if path == &skeleton));
    }

    #[test]
    fn test_write_output_with_backup() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("gui.ino");
        fs::write(&output, "old\n").unwrap();

        write_output(&output, "new\n", OutputOptions::default().with_backup(true)).unwrap();
        assert_eq!(fs::read_to_string(&output).unwrap(), "new\n");
        assert_eq!(fs::read_to_string(sibling(&output, ".bak")).unwrap(), "old\n");
        assert!(!sibling(&output, ".tmp").exists());
    }
}
