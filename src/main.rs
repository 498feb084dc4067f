//! `glearn` binary: opens a window showing one scene.
//!
//! ```text
//! glearn [SCENE] [--options PATH] [--write-options PATH] [--write-schema PATH]
//! ```

use std::path::PathBuf;

use glearn::{GlearnError, Options, SceneKind, Viewer};

const USAGE: &str = "usage: glearn [SCENE] [--options PATH] \
                     [--write-options PATH] [--write-schema PATH]";

/// Parsed command line.
#[derive(Debug, Default, PartialEq)]
struct Args {
    scene: SceneKind,
    options: Option<PathBuf>,
    write_options: Option<PathBuf>,
    write_schema: Option<PathBuf>,
}

impl Args {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self, String> {
        let mut parsed = Self::default();
        let mut scene_given = false;
        while let Some(arg) = args.next() {
            let slot = match arg.as_str() {
                "--options" => &mut parsed.options,
                "--write-options" => &mut parsed.write_options,
                "--write-schema" => &mut parsed.write_schema,
                "-h" | "--help" => return Err(USAGE.to_owned()),
                flag if flag.starts_with("--") => {
                    return Err(format!("unknown flag {flag}\n{USAGE}"));
                }
                name if !scene_given => {
                    parsed.scene = name.parse().map_err(|e: GlearnError| e.to_string())?;
                    scene_given = true;
                    continue;
                }
                extra => return Err(format!("unexpected argument {extra}\n{USAGE}")),
            };
            let Some(path) = args.next() else {
                return Err(format!("{arg} needs a path\n{USAGE}"));
            };
            *slot = Some(PathBuf::from(path));
        }
        Ok(parsed)
    }

    /// Whether the run only writes files and skips opening a window.
    fn writes_only(&self) -> bool {
        self.write_options.is_some() || self.write_schema.is_some()
    }
}

fn run(args: &Args) -> Result<(), GlearnError> {
    let options = match &args.options {
        Some(path) => Options::load(path)?,
        None => Options::default(),
    };

    if let Some(path) = &args.write_options {
        options.save(path)?;
        log::info!("wrote options to {}", path.display());
    }
    if let Some(path) = &args.write_schema {
        std::fs::write(path, Options::json_schema_string()?)?;
        log::info!("wrote options schema to {}", path.display());
    }
    if args.writes_only() {
        return Ok(());
    }

    Viewer::builder()
        .with_scene(args.scene)
        .with_options(options)
        .build()
        .run()
}

fn main() {
    env_logger::init();

    let args = match Args::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&args) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, String> {
        Args::parse(args.iter().map(|s| (*s).to_owned()))
    }

    #[test]
    fn no_arguments_selects_lighting() {
        let args = parse(&[]).unwrap();
        assert_eq!(args.scene, SceneKind::Lighting);
        assert!(args.options.is_none());
        assert!(!args.writes_only());
    }

    #[test]
    fn scene_and_flags() {
        let args = parse(&[
            "line_trails",
            "--options",
            "glearn.toml",
            "--write-schema",
            "schema.json",
        ])
        .unwrap();
        assert_eq!(args.scene, SceneKind::LineTrails);
        assert_eq!(args.options, Some(PathBuf::from("glearn.toml")));
        assert_eq!(args.write_schema, Some(PathBuf::from("schema.json")));
        assert!(args.writes_only());
    }

    #[test]
    fn flag_without_path_is_rejected() {
        assert!(parse(&["--options"]).is_err());
    }

    #[test]
    fn unknown_scene_is_rejected() {
        let err = parse(&["teapot"]).unwrap_err();
        assert!(err.contains("teapot"));
    }

    #[test]
    fn second_positional_is_rejected() {
        assert!(parse(&["lighting", "triangles"]).is_err());
    }
}
