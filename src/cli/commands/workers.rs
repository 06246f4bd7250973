use clap::Subcommand;
use serde_json::json;
use uuid::Uuid;

use super::resource::{self, ResourceCommands};
use crate::cli::context::Context;
use crate::cli::utils::{output_empty_collection, output_success, read_payload};
use crate::cli::OutputFormat;
use crate::models::{Course, CourseCreate};
use crate::view::table::opt;
use crate::view::Table;

#[derive(Subcommand, Debug)]
pub enum WorkerCommands {
    #[command(flatten)]
    Crud(ResourceCommands),

    #[command(about = "List a worker's training courses")]
    Courses {
        #[arg(help = "Worker ID")]
        worker_id: Uuid,
    },

    #[command(about = "Add a training course from stdin (YAML or JSON)")]
    AddCourse {
        #[arg(help = "Worker ID")]
        worker_id: Uuid,
    },

    #[command(about = "Remove a training course")]
    RemoveCourse {
        #[arg(help = "Worker ID")]
        worker_id: Uuid,
        #[arg(help = "Course ID")]
        course_id: Uuid,
    },
}

pub async fn handle(cmd: WorkerCommands, ctx: &Context) -> anyhow::Result<()> {
    let workers = &ctx.app.workers;
    let output_format = &ctx.format;

    match cmd {
        WorkerCommands::Crud(cmd) => resource::handle(&**workers, cmd, output_format).await,
        WorkerCommands::Courses { worker_id } => {
            let courses = workers.courses(worker_id).await?;
            if courses.is_empty() {
                return output_empty_collection(output_format, "courses", "No courses recorded");
            }

            let table = course_table();
            match output_format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&json!({ "courses": courses }))?),
                OutputFormat::Text => print!("{}", table.render(&courses)),
            }
            Ok(())
        }
        WorkerCommands::AddCourse { worker_id } => {
            let payload: CourseCreate = read_payload()?;
            let course = workers.add_course(worker_id, &payload).await?;
            output_success(
                output_format,
                &format!("Added course '{}'", course.name),
                Some(json!({ "course": course })),
            )
        }
        WorkerCommands::RemoveCourse { worker_id, course_id } => {
            let deleted = workers.remove_course(worker_id, course_id).await?;
            output_success(output_format, &deleted.message, Some(json!({ "id": course_id })))
        }
    }
}

fn course_table() -> Table<Course> {
    Table::new()
        .column("name", "Curso", |c: &Course| c.name.clone())
        .column("provider", "Centro", |c: &Course| opt(&c.provider))
        .column("start_date", "Inicio", |c: &Course| opt(&c.start_date))
        .column("end_date", "Fin", |c: &Course| opt(&c.end_date))
        .column("hours", "Horas", |c: &Course| opt(&c.hours))
        .column("id", "ID", |c: &Course| c.id.to_string())
}
