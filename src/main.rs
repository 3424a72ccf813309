use std::process::exit;
use std::time::Duration;

use clap::{ArgGroup, Parser, Subcommand};
use miette::{Diagnostic, Report};
use thiserror::Error;

use outcome_shapes::diagnostics::{init_logging, install_fault_hook, LoggerLevel};
use outcome_shapes::planner::{study, Catalog, LessonKey, LessonUpdate, SessionConfig};
use outcome_shapes::{area, intercept, make_failure, make_success, unwrap_or_fail, Outcome, Shape};

/// Outcomes, faults, and exhaustive dispatch over shapes
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    /// off, error, warn, info, debug (or 0-4). `RUST_LOG` overrides it
    #[arg(long, global = true, default_value = "warn")]
    log_level: LoggerLevel,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compute the area of a shape
    Area {
        #[command(subcommand)]
        shape: ShapeArgs,
    },
    /// Build a success or failure and unwrap it, reporting the fault if it fails
    #[command(group(ArgGroup::new("outcome").required(true).args(["value", "error"])))]
    Unwrap {
        /// Unwrap a success holding this value
        #[arg(long)]
        value: Option<String>,
        /// Unwrap a failure with this message
        #[arg(long)]
        error: Option<String>,
    },
    /// Area of a circle, then unwrap a success and a failure
    Demo,
    /// Print the study plan, then update a lesson's duration and study it
    Plan {
        /// Lesson to study
        #[arg(long, default_value_t = 2)]
        lesson: u32,
        /// New duration of the lesson, in minutes
        #[arg(long, default_value_t = 40)]
        minutes: u32,
        /// How long the session takes
        #[arg(long, default_value_t = 250)]
        delay_ms: u64,
        /// Sessions for lessons longer than this fail
        #[arg(long, default_value_t = 40)]
        max_minutes: u32,
    },
}

#[derive(Debug, Subcommand)]
enum ShapeArgs {
    Circle {
        #[arg(long)]
        radius: f64,
    },
    Square {
        #[arg(long)]
        side: f64,
    },
    Triangle {
        #[arg(long)]
        base: f64,
        #[arg(long)]
        height: f64,
    },
}

#[derive(Debug, Error, Diagnostic)]
enum CliError {
    #[error("Couldn't initialize logging: {0}")]
    #[diagnostic(code(outcome_shapes::logging))]
    Logging(#[from] log::SetLoggerError),
    #[error("Couldn't print lesson: {0}")]
    #[diagnostic(code(outcome_shapes::json))]
    Json(#[from] serde_json::Error),
}

const EXIT_OK: i32 = 0;
const EXIT_FAILED: i32 = 1;
const EXIT_FATAL: i32 = 2;

impl CliError {
    fn exit(self) -> ! {
        eprintln!("{:?}", Report::new(self));
        exit(EXIT_FATAL)
    }
}

/// Run the program
fn main() {
    let Cli { log_level, command } = Cli::parse();
    init_logging(log_level).unwrap_or_else(|error| CliError::from(error).exit());
    install_fault_hook();
    exit(run(command).unwrap_or_else(|error| error.exit()))
}

fn run(command: Command) -> Result<i32, CliError> {
    match command {
        Command::Area { shape } => Ok(run_area(shape)),
        Command::Unwrap { value, error } => {
            let outcome = match value {
                Some(value) => make_success(value),
                None => make_failure(error.unwrap_or_default())
            };
            Ok(run_unwrap(outcome))
        }
        Command::Demo => Ok(run_demo()),
        Command::Plan { lesson, minutes, delay_ms, max_minutes } => {
            let config = SessionConfig { delay: Duration::from_millis(delay_ms), max_minutes };
            run_plan(lesson, minutes, &config)
        }
    }
}

fn run_area(shape: ShapeArgs) -> i32 {
    let shape = match shape {
        ShapeArgs::Circle { radius } => Shape::circle(radius),
        ShapeArgs::Square { side } => Shape::square(side),
        ShapeArgs::Triangle { base, height } => Shape::triangle(base, height)
    };
    match shape {
        Outcome::Success { value: shape } => {
            println!("Area of {} {}", shape.kind(), area(&shape));
            EXIT_OK
        }
        Outcome::Failure { error } => {
            eprintln!("Invalid shape: {}", error);
            EXIT_FAILED
        }
    }
}

fn run_unwrap(outcome: Outcome<String>) -> i32 {
    match intercept(|| unwrap_or_fail(outcome)) {
        Ok(value) => {
            println!("Value from success {}", value);
            EXIT_OK
        }
        Err(fault) => {
            eprintln!("{:?}", Report::new(fault));
            EXIT_FAILED
        }
    }
}

fn run_demo() -> i32 {
    let success: Outcome<i32> = make_success(42);
    let failure: Outcome<i32> = make_failure("Missing value");

    println!("Area of circle {}", area(&Shape::Circle { radius: 2.0 }));
    match intercept(|| unwrap_or_fail(success)) {
        Ok(value) => println!("Value from success {}", value),
        Err(fault) => eprintln!("Unexpected fault from success {}", fault)
    }
    match intercept(|| unwrap_or_fail(failure)) {
        Ok(value) => println!("Value from failure {}", value),
        Err(fault) => eprintln!("Caught error from failure {}", fault.message())
    }
    EXIT_OK
}

fn run_plan(lesson_id: u32, minutes: u32, config: &SessionConfig) -> Result<i32, CliError> {
    let mut catalog = Catalog::starter();

    println!("--- Your study plan ---");
    for lesson in catalog.lessons() {
        println!("{}", lesson);
    }

    println!("\nLessons focused on typing:");
    if let Some(type_lessons) = catalog.group_by(LessonKey::Focus).get("Types") {
        for lesson in type_lessons.iter() {
            println!(" - {}", lesson.title);
        }
    }

    let update = LessonUpdate { duration_minutes: Some(minutes), ..LessonUpdate::default() };
    match study(&mut catalog, lesson_id, update, config) {
        Outcome::Success { value: lesson } => {
            println!("\nCompleted lesson summary:");
            println!("{}", serde_json::to_string_pretty(&lesson.to_json())?);
            Ok(EXIT_OK)
        }
        Outcome::Failure { error } => {
            eprintln!("{}", error);
            Ok(EXIT_FAILED)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use test_log::test;

    use outcome_shapes::planner::SessionConfig;
    use outcome_shapes::{make_failure, make_success};

    use super::{run_area, run_demo, run_plan, run_unwrap, ShapeArgs, EXIT_FAILED, EXIT_OK};

    fn instant(max_minutes: u32) -> SessionConfig {
        SessionConfig { delay: Duration::ZERO, max_minutes }
    }

    #[test]
    fn area_exits_ok_for_valid_shapes() {
        assert_eq!(run_area(ShapeArgs::Circle { radius: 2.0 }), EXIT_OK);
        assert_eq!(run_area(ShapeArgs::Square { side: 4.0 }), EXIT_OK);
        assert_eq!(run_area(ShapeArgs::Triangle { base: 6.0, height: 5.0 }), EXIT_OK);
    }

    #[test]
    fn area_exits_failed_for_invalid_shapes() {
        assert_eq!(run_area(ShapeArgs::Circle { radius: -1.0 }), EXIT_FAILED);
        assert_eq!(run_area(ShapeArgs::Triangle { base: 1.0, height: f64::NAN }), EXIT_FAILED);
    }

    #[test]
    fn unwrap_exits_by_outcome() {
        assert_eq!(run_unwrap(make_success("x".to_string())), EXIT_OK);
        assert_eq!(run_unwrap(make_failure("Missing value")), EXIT_FAILED);
    }

    #[test]
    fn demo_catches_its_failure() {
        assert_eq!(run_demo(), EXIT_OK);
    }

    #[test]
    fn plan_exits_by_session_outcome() {
        assert_eq!(run_plan(2, 40, &instant(40)).ok(), Some(EXIT_OK));
        assert_eq!(run_plan(2, 41, &instant(40)).ok(), Some(EXIT_FAILED));
        assert_eq!(run_plan(9, 10, &instant(40)).ok(), Some(EXIT_FAILED));
    }
}
