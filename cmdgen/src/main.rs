use anyhow::Context;
use clap::Parser;
use cmdgen::codegen::{ConstructorSpec, GeneratorConfig, generate_from_file, write_output};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cmdgen")]
#[command(
    about = "Generates a Go command type with presence tracking from a struct",
    long_about = None
)]
struct Cli {
    /// XML description of the package declaring the struct
    #[arg(short = 'i', long = "input", value_name = "FILE")]
    input: PathBuf,

    /// Where to write the generated command [default: snake_case command name + .go]
    #[arg(short = 'o', long = "out", value_name = "FILE")]
    out: Option<PathBuf>,

    /// Use pointer receivers so setters mutate the command
    #[arg(long = "mutable")]
    mutable: bool,

    /// Include unexported fields
    #[arg(long = "include-unexported")]
    include_unexported: bool,

    /// Generate fields in ascending name order
    #[arg(long = "sorted")]
    sorted: bool,

    /// Struct field to ignore
    #[arg(long = "exclude", value_name = "FIELD")]
    exclude: Vec<String>,

    /// Struct field to generate from; overrides --exclude
    #[arg(long = "include", value_name = "FIELD")]
    include: Vec<String>,

    /// Constructor as NAME:field1,field2; NAME "default" generates New<COMMAND>
    #[arg(long = "constructor", value_name = "NAME:FIELDS")]
    constructor: Vec<String>,

    /// Source struct name
    #[arg(value_name = "STRUCT")]
    struct_name: String,

    /// Generated command type name
    #[arg(value_name = "COMMAND")]
    command_name: String,
}

impl Cli {
    /// Maps the flags onto a generator configuration.
    fn config(&self) -> anyhow::Result<GeneratorConfig> {
        let mut config = GeneratorConfig::new(&self.struct_name, &self.command_name)
            .mutable(self.mutable)
            .include_unexported(self.include_unexported)
            .sorted(self.sorted)
            .exclude(&self.exclude)?
            .include(&self.include)?;

        for spec in &self.constructor {
            config = config.constructor(spec.parse::<ConstructorSpec>()?)?;
        }

        Ok(config)
    }

    fn output_path(&self, config: &GeneratorConfig) -> PathBuf {
        self.out
            .clone()
            .unwrap_or_else(|| PathBuf::from(config.output_file_name()))
    }
}

fn run(cli: &Cli) -> anyhow::Result<PathBuf> {
    let config = cli.config()?;

    let code = generate_from_file(&cli.input, &config).with_context(|| {
        format!(
            "failed to generate {} from {} in {}",
            config.command_name,
            config.struct_name,
            cli.input.display()
        )
    })?;

    let out = cli.output_path(&config);
    write_output(&out, &code)
        .with_context(|| format!("failed to write {}", out.display()))?;

    Ok(out)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let out = run(&cli)?;

    tracing::info!("Generated {} at {}", cli.command_name, out.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PACKAGE: &str = r#"<package name="examples" path="github.com/acme/examples">
    <imports>
        <import path="time"/>
    </imports>
    <struct name="Struct">
        <field name="Name"><primitive spelling="string"/></field>
        <field name="Created"><named module="time" name="Time"/></field>
        <field name="secret"><primitive spelling="string"/></field>
    </struct>
</package>"#;

    #[test]
    fn test_parse_flags() {
        let cli = Cli::try_parse_from([
            "cmdgen",
            "--input",
            "package.xml",
            "--mutable",
            "--exclude",
            "Created",
            "--constructor",
            "default:name",
            "Struct",
            "CreateStructCmd",
        ])
        .unwrap();

        let config = cli.config().unwrap();
        assert!(config.mutable);
        assert!(!config.sorted);
        assert_eq!(config.exclude.items(), ["Created".to_string()]);
        assert_eq!(config.constructors.len(), 1);
        assert_eq!(
            cli.output_path(&config),
            PathBuf::from("create_struct_cmd.go")
        );
    }

    #[test]
    fn test_missing_positional_arguments() {
        assert!(Cli::try_parse_from(["cmdgen", "--input", "package.xml", "Struct"]).is_err());
    }

    #[test]
    fn test_duplicate_constructor_flag() {
        let cli = Cli::try_parse_from([
            "cmdgen",
            "-i",
            "package.xml",
            "--constructor",
            "default:name",
            "--constructor",
            "default",
            "Struct",
            "Cmd",
        ])
        .unwrap();

        let err = cli.config().unwrap_err();
        assert_eq!(err.to_string(), "duplicated constructor name \"default\"");
    }

    #[test]
    fn test_run_writes_command() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("package.xml");
        let out = dir.path().join("cmd.go");
        std::fs::write(&input, PACKAGE).unwrap();
        let input = input.to_string_lossy().to_string();
        let out_arg = out.to_string_lossy().to_string();

        let cli = Cli::try_parse_from([
            "cmdgen",
            "-i",
            input.as_str(),
            "-o",
            out_arg.as_str(),
            "--constructor",
            "default:name,created",
            "Struct",
            "CreateStructCmd",
        ])
        .unwrap();

        let written = run(&cli).unwrap();
        assert_eq!(written, out);

        let code = std::fs::read_to_string(&out).unwrap();
        assert!(code.contains("import (\n\t\"time\"\n)"));
        assert!(code.contains("func NewCreateStructCmd(\n\tvName string,\n\tvCreated time.Time,\n)"));
        assert!(!code.contains("secret"));
    }

    #[test]
    fn test_run_reports_missing_struct() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("package.xml");
        std::fs::write(&input, PACKAGE).unwrap();
        let input = input.to_string_lossy().to_string();

        let cli =
            Cli::try_parse_from(["cmdgen", "-i", input.as_str(), "Missing", "Cmd"]).unwrap();

        let err = run(&cli).unwrap_err();
        assert!(format!("{err:#}").contains("type 'Missing' not found"));
    }
}
