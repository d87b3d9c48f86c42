// Command line definition.
//
// Connection settings can also come from the environment (and host/admin
// room from the config file, see `config`). Room sources can be combined
// freely; they are merged and deduplicated by `rooms::collect_rooms`.

use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::api::{BulkGenerateRequest, Role};
use crate::error::AppError;
use crate::preview::MIN_PASSWORD_LENGTH;
use crate::rooms::{
    BuildingSpec, RoomSources, DEFAULT_DOUBLE_OCCUPANCY_ROOMS, DEFAULT_FLOOR_RANGE,
    DEFAULT_ROOM_RANGE,
};

#[derive(Debug, Clone, Parser)]
#[command(
    name = "laundry-accounts",
    version,
    about = "Generate laundry app accounts for a list of rooms via the admin API."
)]
pub struct Args {
    /// Base URL of the laundry backend [default: http://localhost:8080]
    #[arg(long, env = "LAUNDRY_APP_HOST")]
    pub host: Option<String>,

    /// Master admin room number used for authentication [default: admin]
    #[arg(long, env = "LAUNDRY_APP_ADMIN_ROOM")]
    pub admin_room: Option<String>,

    /// Master admin password. Prompted for when not given.
    #[arg(long, env = "LAUNDRY_APP_ADMIN_PASSWORD", hide_env_values = true)]
    pub admin_password: Option<String>,

    /// Room numbers to create. Can be provided multiple times.
    #[arg(long, num_args = 0.., action = ArgAction::Append)]
    pub rooms: Vec<String>,

    /// Path to a text file containing one room number per line.
    #[arg(long)]
    pub rooms_file: Option<PathBuf>,

    /// Compact layout description, e.g. '01:01-20;02:01-20;P:1-2'.
    /// Room numbers are the floor prefix followed by each unit.
    #[arg(long)]
    pub layout: Option<String>,

    /// Generate room numbers for the whole building using the range and
    /// occupancy options.
    #[arg(long)]
    pub building: bool,

    /// Floor range for --building mode (inclusive).
    #[arg(long, default_value = DEFAULT_FLOOR_RANGE)]
    pub floor_range: String,

    /// Room/apartment range per floor for --building mode (inclusive).
    #[arg(long, default_value = DEFAULT_ROOM_RANGE)]
    pub room_range: String,

    /// Comma-separated room numbers (per floor) that host two residents.
    #[arg(long, default_value = DEFAULT_DOUBLE_OCCUPANCY_ROOMS)]
    pub double_rooms: String,

    /// Digits to use when padding the occupant suffix.
    #[arg(long, default_value_t = 2)]
    pub occupant_padding: usize,

    /// Password length for generated accounts (minimum 8).
    #[arg(long)]
    pub password_length: Option<u32>,

    /// Overwrite existing users with new passwords.
    #[arg(long)]
    pub overwrite: bool,

    /// Don't ask for confirmation before overwriting.
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Assign a specific role to the generated accounts (backend default: USER).
    #[arg(long, value_enum)]
    pub role: Option<Role>,

    /// Max washer minutes per week for all generated accounts.
    #[arg(long)]
    pub max_washer: Option<i64>,

    /// Max dryer minutes per week for all generated accounts.
    #[arg(long)]
    pub max_dryer: Option<i64>,

    /// Preview account generation locally without calling the API.
    #[arg(long)]
    pub dry_run: bool,

    /// Write the generated credentials as CSV to this path.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Config file [default: <config dir>/laundry-accounts/config.json]
    #[arg(long, env = "LAUNDRY_APP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Reject option values the backend (or the expander) would refuse.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.occupant_padding < 1 {
            return Err(AppError::InvalidArgument(
                "--occupant-padding must be at least 1.".to_string(),
            ));
        }
        if let Some(length) = self.password_length {
            if length < MIN_PASSWORD_LENGTH {
                return Err(AppError::InvalidArgument(format!(
                    "password length must be at least {MIN_PASSWORD_LENGTH} characters."
                )));
            }
        }
        Ok(())
    }

    pub fn room_sources(&self) -> RoomSources {
        RoomSources {
            rooms: self.rooms.clone(),
            rooms_file: self.rooms_file.clone(),
            layout: self.layout.clone(),
            building: self.building.then(|| BuildingSpec {
                floor_range: self.floor_range.clone(),
                room_range: self.room_range.clone(),
                double_rooms: self.double_rooms.clone(),
                occupant_padding: self.occupant_padding,
            }),
        }
    }

    /// Request body for the given rooms with the options from the command line.
    pub fn generate_request(&self, rooms: Vec<String>) -> BulkGenerateRequest {
        BulkGenerateRequest {
            rooms,
            password_length: self.password_length,
            overwrite_existing: self.overwrite.then_some(true),
            role: self.role,
            max_washer_minutes_per_week: self.max_washer,
            max_dryer_minutes_per_week: self.max_dryer,
        }
    }
}
