use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::io;
use std::process::ExitCode;

use rolodex::api::types::{CampaignStatus, CustomerStatus, InteractionKind, InteractionStatus};
use rolodex::commands::{
    cmd_analytics, cmd_campaign_add, cmd_campaign_edit, cmd_campaign_queue, cmd_campaign_review,
    cmd_campaign_rm, cmd_campaign_submissions, cmd_campaign_submit, cmd_campaigns_ls,
    cmd_console, cmd_customer_add, cmd_customer_approve, cmd_customer_edit, cmd_customer_reject,
    cmd_customer_rm, cmd_customers_ls, cmd_customers_pending, cmd_interaction_add,
    cmd_interaction_set_status, cmd_interactions_ls, cmd_interactions_pending, cmd_login,
    cmd_logout, cmd_profile_edit, cmd_profile_show, cmd_settings_set, cmd_settings_show,
    cmd_whoami, ListOptions,
};
use rolodex::commands::SettingsSection;
use rolodex::config::Config;
use rolodex::error::{Result, RolodexError};
use rolodex::session::Role;

#[derive(Parser)]
#[command(name = "rolodex")]
#[command(about = "Terminal console for the CRM backend")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and store a session token
    Login {
        /// Username (prompted when omitted)
        #[arg(short, long)]
        username: Option<String>,

        /// Password (prompted when omitted; ROLODEX_PASSWORD also works)
        #[arg(short, long)]
        password: Option<String>,

        /// Role to log in as: admin or customer
        #[arg(short, long, default_value = "customer", value_parser = parse_role)]
        role: Role,
    },

    /// Clear the stored session
    Logout,

    /// Show the current session
    Whoami,

    /// Open the interactive full-screen console
    Console,

    /// Manage customers (admin)
    #[command(subcommand)]
    Customers(CustomerAction),

    /// Browse and log interactions
    #[command(subcommand)]
    Interactions(InteractionAction),

    /// Manage email campaigns
    #[command(subcommand)]
    Campaigns(CampaignAction),

    /// View or edit your own profile
    #[command(subcommand)]
    Profile(ProfileAction),

    /// View or change system settings (admin)
    #[command(subcommand)]
    Settings(SettingsAction),

    /// Show the analytics summary for your role
    Analytics {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// View or change local configuration
    #[command(subcommand)]
    Config(ConfigAction),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(clap::Args, Debug)]
struct ListArgs {
    /// Free-text search
    #[arg(short, long)]
    search: Option<String>,

    /// Sort field
    #[arg(long)]
    sort: Option<String>,

    /// Sort descending
    #[arg(long)]
    desc: bool,

    /// Page index, starting at 0
    #[arg(short, long, default_value = "0")]
    page: u32,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

impl ListArgs {
    fn into_options(self, filter: Option<String>) -> ListOptions {
        ListOptions {
            search: self.search,
            sort: self.sort,
            desc: self.desc,
            page: self.page,
            filter,
            json: self.json,
        }
    }
}

#[derive(Subcommand)]
enum CustomerAction {
    /// List customers
    Ls {
        #[command(flatten)]
        list: ListArgs,
    },

    /// Add a customer
    Add {
        username: String,
        email: String,
        password: String,
        #[arg(long)]
        phone: Option<String>,
    },

    /// Edit a customer
    Edit {
        id: i64,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        /// ACTIVE or PENDING
        #[arg(long, value_parser = parse_customer_status)]
        status: Option<CustomerStatus>,
    },

    /// Delete a customer
    Rm {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// List registrations awaiting approval
    Pending {
        #[arg(long)]
        json: bool,
    },

    /// Approve a pending registration
    Approve { id: i64 },

    /// Reject a pending registration
    Reject {
        id: i64,
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum InteractionAction {
    /// List your interactions
    Ls {
        #[command(flatten)]
        list: ListArgs,

        /// Filter by type: call, email, meeting, other
        #[arg(short = 't', long = "type")]
        kind: Option<String>,
    },

    /// Log a new interaction
    Add {
        /// Type: call, email, meeting, other
        #[arg(value_parser = parse_interaction_kind)]
        kind: InteractionKind,
        subject: String,
        #[arg(long)]
        notes: Option<String>,
    },

    /// List interactions awaiting review (admin)
    Pending {
        #[arg(long)]
        json: bool,
    },

    /// Update an interaction's review status (admin)
    SetStatus {
        id: i64,
        /// completed, scheduled, or pending
        #[arg(value_parser = parse_interaction_status)]
        status: InteractionStatus,
    },
}

#[derive(Subcommand)]
enum CampaignAction {
    /// List campaigns
    Ls {
        #[command(flatten)]
        list: ListArgs,
    },

    /// Create a campaign (as a draft)
    Add { name: String, subject: String },

    /// Edit a campaign
    Edit {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        subject: Option<String>,
        /// draft, scheduled, or sent
        #[arg(long, value_parser = parse_campaign_status)]
        status: Option<CampaignStatus>,
    },

    /// Delete a campaign
    Rm {
        id: i64,
        #[arg(short, long)]
        yes: bool,
    },

    /// Propose a campaign for admin review (customer)
    Submit {
        title: String,
        #[arg(long)]
        description: Option<String>,
    },

    /// List your own campaign proposals (customer)
    Submissions {
        #[arg(long)]
        json: bool,
    },

    /// List customer-submitted campaigns awaiting review (admin)
    Queue {
        #[arg(long)]
        json: bool,
    },

    /// Approve a customer-submitted campaign (admin)
    Approve { id: i64 },

    /// Reject a customer-submitted campaign (admin)
    Reject { id: i64 },
}

#[derive(Subcommand)]
enum ProfileAction {
    /// Show your profile
    Show {
        #[arg(long)]
        json: bool,
    },

    /// Update profile fields
    Edit {
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Show the system settings
    Show {
        #[arg(long)]
        json: bool,
    },

    /// Replace one settings section with a JSON document
    Set {
        /// general, email, or security
        section: String,
        /// JSON document for the section
        value: String,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show the local configuration
    Show,

    /// Set the backend base URL
    SetUrl { url: String },
}

fn parse_role(s: &str) -> std::result::Result<Role, String> {
    s.parse().map_err(|e: RolodexError| e.to_string())
}

fn parse_customer_status(s: &str) -> std::result::Result<CustomerStatus, String> {
    match s.to_uppercase().as_str() {
        "ACTIVE" => Ok(CustomerStatus::Active),
        "PENDING" => Ok(CustomerStatus::Pending),
        _ => Err(format!("unknown status '{s}', expected ACTIVE or PENDING")),
    }
}

fn parse_interaction_kind(s: &str) -> std::result::Result<InteractionKind, String> {
    match s.to_lowercase().as_str() {
        "call" => Ok(InteractionKind::Call),
        "email" => Ok(InteractionKind::Email),
        "meeting" => Ok(InteractionKind::Meeting),
        "other" => Ok(InteractionKind::Other),
        _ => Err(format!(
            "unknown type '{s}', expected call, email, meeting, or other"
        )),
    }
}

fn parse_interaction_status(s: &str) -> std::result::Result<InteractionStatus, String> {
    match s.to_lowercase().as_str() {
        "completed" => Ok(InteractionStatus::Completed),
        "scheduled" => Ok(InteractionStatus::Scheduled),
        "pending" => Ok(InteractionStatus::Pending),
        _ => Err(format!(
            "unknown status '{s}', expected completed, scheduled, or pending"
        )),
    }
}

fn parse_campaign_status(s: &str) -> std::result::Result<CampaignStatus, String> {
    match s.to_lowercase().as_str() {
        "draft" => Ok(CampaignStatus::Draft),
        "scheduled" => Ok(CampaignStatus::Scheduled),
        "sent" => Ok(CampaignStatus::Sent),
        _ => Err(format!(
            "unknown status '{s}', expected draft, scheduled, or sent"
        )),
    }
}

fn cmd_config_show() -> Result<()> {
    let config = Config::load()?;
    println!("api_url: {}", config.api_url);
    println!("page_size: {}", config.page_size);
    Ok(())
}

fn cmd_config_set_url(url: &str) -> Result<()> {
    let mut config = Config::load()?;
    config.set_api_url(url)?;
    config.save()?;
    println!("Backend set to {}", config.api_url);
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Login {
            username,
            password,
            role,
        } => cmd_login(username, password, role).await,
        Commands::Logout => cmd_logout(),
        Commands::Whoami => cmd_whoami(),

        Commands::Console => cmd_console(),

        Commands::Customers(action) => match action {
            CustomerAction::Ls { list } => cmd_customers_ls(list.into_options(None)).await,
            CustomerAction::Add {
                username,
                email,
                password,
                phone,
            } => cmd_customer_add(username, email, password, phone).await,
            CustomerAction::Edit {
                id,
                username,
                email,
                phone,
                status,
            } => cmd_customer_edit(id, username, email, phone, status).await,
            CustomerAction::Rm { id, yes } => cmd_customer_rm(id, yes).await,
            CustomerAction::Pending { json } => cmd_customers_pending(json).await,
            CustomerAction::Approve { id } => cmd_customer_approve(id).await,
            CustomerAction::Reject { id, yes } => cmd_customer_reject(id, yes).await,
        },

        Commands::Interactions(action) => match action {
            InteractionAction::Ls { list, kind } => {
                cmd_interactions_ls(list.into_options(kind)).await
            }
            InteractionAction::Add {
                kind,
                subject,
                notes,
            } => cmd_interaction_add(kind, subject, notes).await,
            InteractionAction::Pending { json } => cmd_interactions_pending(json).await,
            InteractionAction::SetStatus { id, status } => {
                cmd_interaction_set_status(id, status).await
            }
        },

        Commands::Campaigns(action) => match action {
            CampaignAction::Ls { list } => cmd_campaigns_ls(list.into_options(None)).await,
            CampaignAction::Add { name, subject } => cmd_campaign_add(name, subject).await,
            CampaignAction::Edit {
                id,
                name,
                subject,
                status,
            } => cmd_campaign_edit(id, name, subject, status).await,
            CampaignAction::Rm { id, yes } => cmd_campaign_rm(id, yes).await,
            CampaignAction::Submit { title, description } => {
                cmd_campaign_submit(title, description).await
            }
            CampaignAction::Submissions { json } => cmd_campaign_submissions(json).await,
            CampaignAction::Queue { json } => cmd_campaign_queue(json).await,
            CampaignAction::Approve { id } => cmd_campaign_review(id, true).await,
            CampaignAction::Reject { id } => cmd_campaign_review(id, false).await,
        },

        Commands::Profile(action) => match action {
            ProfileAction::Show { json } => cmd_profile_show(json).await,
            ProfileAction::Edit {
                username,
                email,
                phone,
            } => cmd_profile_edit(username, email, phone).await,
        },

        Commands::Settings(action) => match action {
            SettingsAction::Show { json } => cmd_settings_show(json).await,
            SettingsAction::Set { section, value } => match section.parse::<SettingsSection>() {
                Ok(section) => cmd_settings_set(section, value).await,
                Err(e) => Err(e),
            },
        },

        Commands::Analytics { json } => cmd_analytics(json).await,

        Commands::Config(action) => match action {
            ConfigAction::Show => cmd_config_show(),
            ConfigAction::SetUrl { url } => cmd_config_set_url(&url),
        },

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "rolodex", &mut io::stdout());
            Ok(())
        }
    };

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
