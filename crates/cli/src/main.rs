use anyhow::{Context, Result, bail};
use chrono::Local;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use std::sync::Arc;

use api_client::{ApiClient, ApiConfig, DEFAULT_BASE_URL};
use controller::{
    ManagerProjectsController, ProjectListController, ProposalInbox, Trigger, UiEffect,
};
use favorites::{EventBridge, InMemorySessionCache};
use listing::{Facet, StatusTab};
use market_types::{
    BudgetType, Location, MemberId, Project, ProjectField, ProjectId, ProjectStatus,
    ProposalId, RecruitmentType, Session, budget_label, d_day_label,
};

/// Marketplace - command-line client for the freelance project marketplace
#[derive(Parser)]
#[command(name = "marketplace")]
#[command(about = "Browse projects, manage favorites and answer proposals", long_about = None)]
struct Cli {
    /// Base URL of the marketplace backend
    #[arg(long, env = "MARKETPLACE_API_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Bearer token sent with every request
    #[arg(long, env = "MARKETPLACE_ACCESS_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[command(flatten)]
    user: UserArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Who is signed in. Leave out to browse anonymously.
#[derive(Args)]
struct UserArgs {
    /// Member id of the signed-in user
    #[arg(long, requires = "username")]
    member_id: Option<MemberId>,

    /// Username of the signed-in user
    #[arg(long, requires = "member_id")]
    username: Option<String>,

    /// Role of the signed-in user (repeatable, e.g. FREELANCER)
    #[arg(long = "role")]
    roles: Vec<String>,
}

impl UserArgs {
    fn session(&self) -> Session {
        match (self.member_id, &self.username) {
            (Some(member_id), Some(username)) => {
                Session::signed_in(member_id, username.clone(), self.roles.clone())
            }
            _ => Session::anonymous(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List projects, one page at a time
    Projects(ProjectArgs),

    /// Toggle a project's favorite state, then list projects
    Favorite {
        #[arg(long)]
        project_id: ProjectId,
    },

    /// Show every project of one manager, by status tab
    Manager {
        #[arg(long)]
        manager_id: MemberId,

        /// Status tab to show (code, label or "all")
        #[arg(long, default_value = "all")]
        tab: StatusTab,
    },

    /// Work with the proposal inbox
    Proposals {
        #[command(subcommand)]
        action: ProposalAction,
    },
}

#[derive(Args)]
struct ProjectArgs {
    /// Free-text search
    #[arg(long)]
    search: Option<String>,

    /// Project field (code or label)
    #[arg(long)]
    field: Option<ProjectField>,

    /// Recruitment type (code or label)
    #[arg(long)]
    recruitment: Option<RecruitmentType>,

    /// Project status (defaults to recruiting)
    #[arg(long, conflicts_with = "any_status")]
    status: Option<ProjectStatus>,

    /// Do not filter by status
    #[arg(long)]
    any_status: bool,

    /// Company location (code or label)
    #[arg(long)]
    location: Option<Location>,

    /// Budget bracket (code or label)
    #[arg(long)]
    budget: Option<BudgetType>,

    /// 1-based page number
    #[arg(long, default_value = "1")]
    page: u32,

    /// Float favorited projects to the top of the page
    #[arg(long)]
    favorites_first: bool,
}

impl ProjectArgs {
    fn facets(&self) -> Vec<Facet> {
        let mut facets = vec![
            Facet::ProjectField(self.field),
            Facet::RecruitmentType(self.recruitment),
            Facet::Location(self.location),
            Facet::Budget(self.budget),
        ];
        if self.any_status {
            facets.push(Facet::Status(None));
        } else if let Some(status) = self.status {
            facets.push(Facet::Status(Some(status)));
        }
        facets
    }
}

#[derive(Subcommand)]
enum ProposalAction {
    /// List the proposals of the signed-in user
    List,

    /// Accept a proposal
    Accept {
        #[arg(long)]
        id: ProposalId,
        #[arg(long)]
        message: String,
    },

    /// Reject a proposal
    Reject {
        #[arg(long)]
        id: ProposalId,
        #[arg(long)]
        message: String,
        #[arg(long)]
        reason: Option<String>,
    },

    /// Withdraw a proposal
    Cancel {
        #[arg(long)]
        id: ProposalId,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = ApiConfig::new(cli.base_url.clone());
    if let Some(token) = &cli.token {
        config = config.with_access_token(token.clone());
    }
    let api = ApiClient::new(config).context("Failed to create the API client")?;
    let session = cli.user.session();

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Projects(args) => handle_projects(api, session, args).await?,
        Commands::Favorite { project_id } => handle_favorite(api, session, project_id).await?,
        Commands::Manager { manager_id, tab } => handle_manager(api, manager_id, tab).await?,
        Commands::Proposals { action } => handle_proposals(api, session, action).await?,
    }

    Ok(())
}

fn open_list(api: ApiClient) -> ProjectListController {
    ProjectListController::new(
        api,
        EventBridge::default(),
        Arc::new(InMemorySessionCache::new()),
    )
}

/// Handle the 'projects' command
async fn handle_projects(api: ApiClient, session: Session, args: ProjectArgs) -> Result<()> {
    if args.page == 0 {
        bail!("Page numbers start at 1");
    }

    let mut list = open_list(api);
    list.handle(Trigger::SessionChanged(session)).await;
    list.handle(Trigger::FiltersChanged(args.facets())).await;
    if let Some(search) = &args.search {
        list.handle(Trigger::SearchSubmitted(search.clone())).await;
    }
    if args.page > 1 {
        list.handle(Trigger::PageSelected(args.page - 1)).await;
    }
    if args.favorites_first {
        list.handle(Trigger::SortToggled).await;
    }

    print_project_list(&list);
    print_effects(list.take_effects());
    Ok(())
}

/// Handle the 'favorite' command
async fn handle_favorite(api: ApiClient, session: Session, project_id: ProjectId) -> Result<()> {
    let mut list = open_list(api);
    list.handle(Trigger::SessionChanged(session)).await;
    list.handle(Trigger::FavoriteToggleRequested(project_id)).await;

    if list.session().is_authenticated() {
        let state = if list.is_favorite(project_id) {
            "favorited".green()
        } else {
            "not favorited".yellow()
        };
        println!("Project {} is now {}", project_id, state);
    }
    print_project_list(&list);
    print_effects(list.take_effects());
    Ok(())
}

/// Handle the 'manager' command
async fn handle_manager(api: ApiClient, manager_id: MemberId, tab: StatusTab) -> Result<()> {
    let mut view = ManagerProjectsController::new(api, manager_id);
    view.load().await;
    view.select_tab(tab);

    let tabs = view
        .tab_counts()
        .into_iter()
        .map(|(t, count)| {
            let label = format!("{} ({})", t.label(), count);
            if t == view.active_tab() {
                label.bold().blue().to_string()
            } else {
                label
            }
        })
        .collect::<Vec<_>>()
        .join(" | ");
    println!("{}", format!("Projects of manager {manager_id}").bold().blue());
    println!("{tabs}");
    for project in view.visible() {
        print_project(&project, false);
    }
    print_effects(view.take_effects());
    Ok(())
}

/// Handle the 'proposals' command
async fn handle_proposals(api: ApiClient, session: Session, action: ProposalAction) -> Result<()> {
    let mut inbox = ProposalInbox::new(api, session);
    inbox.load().await;

    match action {
        ProposalAction::List => {}
        ProposalAction::Accept { id, message } => {
            if !inbox.open_accept(id) {
                print_effects(inbox.take_effects());
                bail!("Proposal {} is not in your inbox", id);
            }
            inbox.submit_modal(&message, None).await;
        }
        ProposalAction::Reject {
            id,
            message,
            reason,
        } => {
            if !inbox.open_reject(id) {
                print_effects(inbox.take_effects());
                bail!("Proposal {} is not in your inbox", id);
            }
            inbox.submit_modal(&message, reason.as_deref()).await;
        }
        ProposalAction::Cancel { id } => inbox.cancel(id).await,
    }

    println!(
        "{}",
        format!("Proposals ({:?} view):", inbox.viewer()).bold().blue()
    );
    for proposal in inbox.proposals() {
        let counterpart = inbox
            .chat_target(proposal.id)
            .map(|target| target.receiver_name)
            .unwrap_or_default();
        println!(
            "{}. {} [{:?}] with {} - {}",
            proposal.id.to_string().green(),
            proposal.project_title,
            proposal.status,
            counterpart,
            proposal.message
        );
        if let Some(reason) = proposal.rejection_reason.as_deref().filter(|r| !r.is_empty()) {
            println!("   Rejection reason: {}", reason);
        }
    }
    print_effects(inbox.take_effects());
    Ok(())
}

/// Print the current page of a listing, with its pagination line.
fn print_project_list(list: &ProjectListController) {
    let pagination = list.pagination();
    let sorted = if list.sort_by_favorite() {
        " (favorites first)"
    } else {
        ""
    };
    println!(
        "{}",
        format!(
            "Projects - page {} of {}{}",
            pagination.current, pagination.total_pages, sorted
        )
        .bold()
        .blue()
    );
    if list.page().items.is_empty() {
        println!("No projects found.");
    }
    for project in &list.page().items {
        let favorite = project.id.is_some_and(|id| list.is_favorite(id));
        print_project(project, favorite);
    }
}

fn print_project(project: &Project, favorite: bool) {
    let marker = if favorite { "♥".red() } else { " ".normal() };
    let id = project
        .id
        .map(|id| id.to_string())
        .unwrap_or_else(|| "?".to_string());
    let status = project.status.map(|s| s.label()).unwrap_or("-");
    let location = project.company_location.map(|l| l.label()).unwrap_or("-");
    let deadline = project
        .end_date
        .map(|end| d_day_label(end, Local::now().date_naive()))
        .unwrap_or_default();

    println!(
        "{} {}. {} [{}] {} · {} {}",
        marker,
        id.green(),
        project.title,
        status,
        budget_label(project.budget_type),
        location,
        deadline.yellow()
    );
}

/// Print the effects the controllers asked the host to carry out.
fn print_effects(effects: Vec<UiEffect>) {
    for effect in effects {
        match effect {
            UiEffect::Alert(message) => println!("{} {}", "!".yellow().bold(), message),
            UiEffect::RedirectToSignIn => println!(
                "{} Sign in with --member-id and --username to continue",
                "→".cyan()
            ),
            UiEffect::ScrollToTop => {}
        }
    }
}
