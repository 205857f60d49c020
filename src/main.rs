use clap::{Args, Parser, Subcommand};
use imghandle::imaging::{ImageHandle, ImageType, Quality, SaveOptions, Transform};
use imghandle::{config, data_uri, output};
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "imghandle")]
#[command(about = "Inspect, resize, rotate and re-encode images")]
#[command(long_about = "\
Inspect, resize, rotate and re-encode images

Supported types: JPEG, PNG, GIF, WebP. Input types are detected from the
file header, not the extension.

Examples:

  imghandle info photo.png
  imghandle convert photo.png thumb.jpg --width 200 --quality 85
  imghandle convert scan.jpg - --rotate 90 --format png > rotated.png
  imghandle extension 'data:image/png;base64,iVBORw0...'
  imghandle decode uploads/ avatar < avatar.datauri

Set RUST_LOG=debug to trace every operation on stderr.")]
#[command(version)]
struct Cli {
    /// TOML file with output and resize defaults (see `gen-config`)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print type and dimensions of an image
    Info {
        file: PathBuf,
    },
    /// Load an image, transform it, and write it out
    Convert(ConvertArgs),
    /// Print the MIME subtype of a data URI
    Extension {
        data: String,
    },
    /// Write the payload of a data URI to DIR/NAME.EXT
    Decode(DecodeArgs),
    /// Print a stock config with all options documented
    GenConfig,
}

#[derive(Args)]
struct ConvertArgs {
    input: PathBuf,
    /// Output file, or `-` for stdout
    output: String,
    /// Target width (height follows the aspect ratio unless --height is set)
    #[arg(long, conflicts_with = "scale")]
    width: Option<u32>,
    /// Target height (width follows the aspect ratio unless --width is set)
    #[arg(long, conflicts_with = "scale")]
    height: Option<u32>,
    /// Scale by percentage of the original size
    #[arg(long)]
    scale: Option<f64>,
    /// Rotate counter-clockwise by degrees, applied before resizing
    #[arg(long, allow_hyphen_values = true)]
    rotate: Option<f32>,
    /// Output type; defaults to the output extension, then the config
    #[arg(long)]
    format: Option<ImageType>,
    /// JPEG quality 0-100
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=100))]
    quality: Option<u32>,
    /// Octal file mode for the written file, e.g. 644
    #[arg(long, value_parser = parse_mode)]
    mode: Option<u32>,
}

#[derive(Args)]
struct DecodeArgs {
    dir: PathBuf,
    name: String,
    /// File extension; defaults to the data URI's subtype
    #[arg(long)]
    ext: Option<String>,
    /// Read the data URI from a file instead of stdin
    #[arg(long)]
    input: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let cli = Cli::parse();
    let config = config::load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Info { file } => {
            let mut handle = ImageHandle::new();
            handle.load(&file)?;
            let image_type = handle.image_type().ok_or("no image type after load")?;
            output::print_lines(&output::format_info(
                &file,
                image_type,
                handle.dimensions()?,
            ));
        }
        Command::Convert(args) => {
            let mut handle = ImageHandle::new().with_filter(config.resize.filter);
            handle.load(&args.input)?;
            let input_type = handle.image_type().ok_or("no image type after load")?;
            let before = (input_type, handle.dimensions()?);

            let transforms = plan_transforms(&args);
            for transform in &transforms {
                handle.apply(*transform)?;
            }

            let options = save_options(&args, &config);
            if args.output == "-" {
                handle.output(options.format)?;
            } else {
                handle.save(&args.output, options)?;
            }

            let lines = output::format_convert(
                &args.input,
                &args.output,
                before,
                &transforms,
                (options.format, handle.dimensions()?),
            );
            // Keep stdout clean when it carries the image itself
            if args.output == "-" {
                for line in lines {
                    eprintln!("{}", line);
                }
            } else {
                output::print_lines(&lines);
            }
        }
        Command::Extension { data } => {
            println!("{}", data_uri::image_extension(&data)?);
        }
        Command::Decode(args) => {
            let data = read_input(args.input.as_deref())?;
            let ext = match args.ext {
                Some(ext) => ext,
                None => data_uri::image_extension(&data)?,
            };
            let path = data_uri::save_image(&args.dir, &data, &args.name, &ext, true)?;
            let bytes = std::fs::metadata(&path)?.len();
            output::print_lines(&output::format_decoded(&path, bytes));
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Log to stderr so `convert ... -` can stream the image on stdout.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Rotation first (it starts from the source file), then at most one resize.
fn plan_transforms(args: &ConvertArgs) -> Vec<Transform> {
    let mut transforms = Vec::new();
    if let Some(degrees) = args.rotate {
        transforms.push(Transform::Rotate(degrees));
    }
    match (args.width, args.height, args.scale) {
        (Some(width), Some(height), _) => transforms.push(Transform::Resize { width, height }),
        (Some(width), None, _) => transforms.push(Transform::ResizeToWidth(width)),
        (None, Some(height), _) => transforms.push(Transform::ResizeToHeight(height)),
        (None, None, Some(percent)) => transforms.push(Transform::Scale(percent)),
        (None, None, None) => {}
    }
    transforms
}

/// Flags win over the output extension, which wins over the config file.
fn save_options(args: &ConvertArgs, config: &config::Config) -> SaveOptions {
    let defaults = config.save_options();
    let from_extension = Path::new(&args.output)
        .extension()
        .and_then(|e| e.to_str())
        .and_then(|e| e.parse::<ImageType>().ok());

    SaveOptions {
        format: args.format.or(from_extension).unwrap_or(defaults.format),
        quality: args.quality.map(Quality::new).unwrap_or(defaults.quality),
        permissions: args.mode.or(defaults.permissions),
    }
}

fn parse_mode(s: &str) -> Result<u32, String> {
    let digits = s.trim_start_matches("0o");
    match u32::from_str_radix(digits, 8) {
        Ok(mode) if mode <= 0o7777 => Ok(mode),
        _ => Err(format!("invalid octal file mode: {s}")),
    }
}

fn read_input(path: Option<&Path>) -> std::io::Result<String> {
    let data = match path {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    Ok(data.trim().to_string())
}
