//! Department commands
//!
//! Usage: salesdb department <list|get|insert|update|delete>

use super::{CommandResult, Context};
use clap::{Args, Subcommand};
use salesdb_core::model::Department;
use salesdb_core::DepartmentDao;

#[derive(Debug, Args)]
pub struct DepartmentArgs {
    #[command(subcommand)]
    pub command: DepartmentCommand,
}

#[derive(Debug, Subcommand)]
pub enum DepartmentCommand {
    /// List all departments by name
    List,
    /// Show one department
    Get { id: i64 },
    /// Create a department and print it with its new id
    Insert {
        #[arg(long)]
        name: String,
    },
    /// Rename a department
    Update {
        id: i64,
        #[arg(long)]
        name: String,
    },
    /// Delete a department (fails while sellers reference it)
    Delete { id: i64 },
}

pub fn execute(ctx: &Context, args: DepartmentArgs) -> CommandResult {
    let factory = ctx.factory();
    let dao = factory.department_dao();

    match args.command {
        DepartmentCommand::List => ctx.print_many(&dao.find_all()?, "No departments"),
        DepartmentCommand::Get { id } => ctx.print_one(&dao.find_by_id(id)?),
        DepartmentCommand::Insert { name } => {
            let mut department = Department::new(name);
            dao.insert(&mut department)?;
            ctx.print_one(&department)
        }
        DepartmentCommand::Update { id, name } => {
            let department = Department::with_id(id, name);
            dao.update(&department)?;
            ctx.print_one(&department)
        }
        DepartmentCommand::Delete { id } => {
            let deleted = dao.delete(id)?;
            ctx.print_deleted("department", id, deleted)
        }
    }
}
