//! Seller commands
//!
//! Usage: salesdb seller <list|get|by-department|insert|update|delete>

use super::{CommandResult, Context};
use chrono::{NaiveDate, NaiveDateTime};
use clap::{Args, Subcommand};
use salesdb_core::model::{Department, Seller};
use salesdb_core::SellerDao;

#[derive(Debug, Args)]
pub struct SellerArgs {
    #[command(subcommand)]
    pub command: SellerCommand,
}

#[derive(Debug, Subcommand)]
pub enum SellerCommand {
    /// List all sellers by name
    List,
    /// Show one seller
    Get { id: i64 },
    /// List the sellers of one department
    ByDepartment { department_id: i64 },
    /// Create a seller and print it with its new id
    Insert(NewSellerArgs),
    /// Change a seller; omitted fields keep their stored values
    Update(UpdateSellerArgs),
    /// Delete a seller
    Delete { id: i64 },
}

#[derive(Debug, Args)]
pub struct NewSellerArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,

    /// YYYY-MM-DD or YYYY-MM-DD HH:MM:SS
    #[arg(long, value_parser = parse_birth_date)]
    pub birth_date: NaiveDateTime,

    #[arg(long)]
    pub base_salary: f64,

    /// Id of an existing department
    #[arg(long)]
    pub department: i64,
}

#[derive(Debug, Args)]
pub struct UpdateSellerArgs {
    pub id: i64,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long, value_parser = parse_birth_date)]
    pub birth_date: Option<NaiveDateTime>,

    #[arg(long)]
    pub base_salary: Option<f64>,

    #[arg(long)]
    pub department: Option<i64>,
}

pub fn execute(ctx: &Context, args: SellerArgs) -> CommandResult {
    let factory = ctx.factory();
    let dao = factory.seller_dao();

    match args.command {
        SellerCommand::List => ctx.print_many(&dao.find_all()?, "No sellers"),
        SellerCommand::Get { id } => ctx.print_one(&dao.find_by_id(id)?),
        SellerCommand::ByDepartment { department_id } => ctx.print_many(
            &dao.find_by_department(&Department::reference(department_id))?,
            "No sellers",
        ),
        SellerCommand::Insert(new) => {
            let mut seller = Seller::new(
                new.name,
                new.email,
                new.birth_date,
                new.base_salary,
                Department::reference(new.department),
            );
            dao.insert(&mut seller)?;
            let id = seller.id.ok_or("insert did not assign an id")?;
            // Re-read so the department name is filled in
            ctx.print_one(&dao.find_by_id(id)?)
        }
        SellerCommand::Update(changes) => {
            let mut seller = dao.find_by_id(changes.id)?;
            if let Some(name) = changes.name {
                seller.name = name;
            }
            if let Some(email) = changes.email {
                seller.email = email;
            }
            if let Some(birth_date) = changes.birth_date {
                seller.birth_date = birth_date;
            }
            if let Some(base_salary) = changes.base_salary {
                seller.base_salary = base_salary;
            }
            if let Some(department) = changes.department {
                seller.department = Department::reference(department);
            }
            dao.update(&seller)?;
            ctx.print_one(&dao.find_by_id(changes.id)?)
        }
        SellerCommand::Delete { id } => {
            let deleted = dao.delete(id)?;
            ctx.print_deleted("seller", id, deleted)
        }
    }
}

fn parse_birth_date(value: &str) -> Result<NaiveDateTime, String> {
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| format!("invalid date: {}", value));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
        .map_err(|e| format!("expected YYYY-MM-DD: {}", e))
}
