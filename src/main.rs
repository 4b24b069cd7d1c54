mod annotations;
mod config;
mod crowd_counting;
mod error;
mod image_utils;
mod object_detection;
use clap::Parser;
use config::DetectorConfig;
use crowd_counting::json_output::to_json_line;
use crowd_counting::people_counter::PeopleCounter;
use error::CrowdDetectError;
use object_detection::object_detection_utils::coco_class_names;
use object_detection::yolov8::Yolov8;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{Level, Subscriber, debug, error};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::util::SubscriberInitExt;

/// Counts the people in an image and prints `{"count": <int>, "confidence": <float>}`.
#[derive(Parser, Debug)]
#[command(disable_help_flag = true, disable_version_flag = true)]
struct Args {
    /// Image to run person detection on.
    image: OsString,
}

impl Args {
    /// Anything other than exactly one argument is a usage error.
    fn try_from_args<I, T>(args: I) -> Result<Self, CrowdDetectError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let mut args: Vec<OsString> = args.into_iter().map(Into::into).collect();
        if args.len() != 2 {
            return Err(CrowdDetectError::Usage);
        }
        // Everything after `--` reaches the parser verbatim, including `--` itself and `-h`.
        args.insert(1, OsString::from("--"));
        Args::try_parse_from(args).map_err(|_| CrowdDetectError::Usage)
    }

    fn image_path(&self) -> PathBuf {
        PathBuf::from(&self.image)
    }
}

/// Plain fmt subscriber at WARN so a successful run leaves stderr empty.
fn stderr_subscriber<W>(make_writer: W) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_writer(make_writer)
        .with_max_level(Level::WARN)
        .with_target(false)
        .finish()
}

fn main() -> ExitCode {
    // Usage errors exit before logging is set up so they stay silent.
    let args = match Args::try_from_args(std::env::args_os()) {
        Ok(args) => args,
        Err(e) => return e.exit_code(),
    };
    stderr_subscriber(std::io::stderr).init();

    match run(&args.image_path(), &DetectorConfig::default()) {
        Ok(line) => {
            println!("{line}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            e.exit_code()
        }
    }
}

fn run(image_path: &Path, config: &DetectorConfig) -> Result<String, CrowdDetectError> {
    let model = Yolov8::new(
        &config.model_path,
        coco_class_names(),
        config.input_width,
        config.input_height,
    )?;
    let mut counter = PeopleCounter::new(model, config)?;
    let summary = counter.count_people_in_file(image_path)?;
    debug!(
        class_id = counter.target_class_id(),
        count = summary.count,
        confidence = summary.confidence,
        "counted detections"
    );
    Ok(to_json_line(&summary)?)
}
