use clap::Parser as ClapParser;
use log::{info, warn};
use std::fs;
use std::path::Path;

use crate::codegen;
use crate::error::{self, Error, Report};
use crate::parser;
use crate::parser::ast::TypeModel;
use crate::scan;

/// Command-line arguments for the reflection generator.
#[derive(ClapParser, Debug, Default)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Root directory scanned for annotated headers
    pub input_path: String,

    /// Path for the generated .h/.c pair, without extension
    pub output_path: String,

    /// Module name used for generated symbol names
    #[arg(short, long, default_value = "cflex")]
    pub module: String,

    /// Emit the primitive tables only, without scanning for headers
    #[arg(long)]
    pub skip_discovery: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Drives one generator run: discover headers, parse each source unit into
/// the type model, then emit the generated pair.
pub struct Generator {
    cli: Cli,
    model: TypeModel,
    includes: Vec<String>,
}

impl Generator {
    pub fn new(cli: Cli) -> Self {
        Self {
            cli,
            model: TypeModel::new(),
            includes: Vec::new(),
        }
    }

    pub fn print_diagnostic(&self, err: &Error) {
        error::report(&Report::from(err));
    }

    /// The type model accumulated so far.
    pub fn model(&self) -> &TypeModel {
        &self.model
    }

    /// Parses already-loaded text as one source unit, appending to the
    /// model. The parser core never touches the filesystem; this is the
    /// seam that keeps it that way.
    pub fn run_virtual_unit(&mut self, path: &str, text: &str) -> Result<(), Error> {
        parser::scan_unit(text, &mut self.model).map_err(|source| Error::Parse {
            path: path.to_string(),
            source,
        })
    }

    pub fn run(&mut self) -> Result<(), Error> {
        if self.cli.skip_discovery {
            info!("discovery skipped, emitting primitive tables only");
        } else {
            self.discover_and_parse()?;
        }
        self.emit()
    }

    fn discover_and_parse(&mut self) -> Result<(), Error> {
        let root = Path::new(&self.cli.input_path);
        let headers = scan::find_header_files(root).map_err(|source| Error::Scan {
            path: self.cli.input_path.clone(),
            source,
        })?;
        info!(
            "found {} header file(s) under {}",
            headers.len(),
            root.display()
        );

        for path in headers {
            let display = path.display().to_string();
            let text = match fs::read_to_string(&path) {
                Ok(text) => text,
                // An unreadable unit is skipped; it never poisons the model
                // or aborts the other units.
                Err(err) => {
                    warn!("skipping unreadable header {display}: {err}");
                    continue;
                }
            };
            self.run_virtual_unit(&display, &text)?;

            if let Some(name) = path.file_name() {
                self.includes.push(name.to_string_lossy().into_owned());
            }
        }
        Ok(())
    }

    fn emit(&self) -> Result<(), Error> {
        let header_path = format!("{}.h", self.cli.output_path);
        let source_path = format!("{}.c", self.cli.output_path);

        let header = codegen::generate_header(&self.model, &self.cli.module);
        fs::write(&header_path, header).map_err(|err| Error::Write {
            path: header_path.clone(),
            source: err,
        })?;

        let source = codegen::generate_source(&self.model, &self.cli.module, &self.includes);
        fs::write(&source_path, source).map_err(|err| Error::Write {
            path: source_path.clone(),
            source: err,
        })?;

        info!(
            "generated {} type(s) into {} and {}",
            self.model.len(),
            header_path,
            source_path
        );
        Ok(())
    }
}
