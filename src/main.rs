use std::sync::Arc;

use anyhow::bail;
use clap::{Args, Parser, Subcommand};
use membros_dashboard::auth::{dto::login_dto::LoginDto, AuthService};
use membros_dashboard::membros::{
  dto::create_membro_dto::IdInput,
  form::{CreateMembroForm, FormEvent},
  list::MembroList,
  HttpMembroService, MembroService,
};
use membros_dashboard::shared::{
  api_client::ApiClient,
  config::Config,
  error::{DashboardError, ValidationError},
  logger::init_logger,
  role::Role,
  session::SessionContext,
};
use membros_dashboard::user::{AuthStatus, UserService, UserSession};

#[derive(Parser)]
#[command(name = "membros-dashboard")]
#[command(about = "Painel de membros: login, listagem e cadastro")]
struct Cli {
  /// Base URL of the API, e.g. http://127.0.0.1:8000/api
  #[arg(long, env = "API_BASE_URL")]
  api_base_url: Option<String>,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Sign in and keep the token for later commands
  Login {
    #[arg(short, long)]
    username: String,
    #[arg(short, long)]
    password: String,
  },
  /// Forget the stored token
  Logout,
  /// Show the signed-in user
  Whoami,
  /// List members, one page at a time
  List {
    /// Zero-based page index
    #[arg(long, default_value_t = 0)]
    page: usize,
  },
  /// Member totals per role
  Count,
  /// Register a new member
  Add(AddArgs),
}

#[derive(Args)]
struct AddArgs {
  #[arg(long)]
  nome: String,
  /// Pastor, Supervisor, Líder or Membro
  #[arg(long)]
  cargo: String,
  #[arg(long, default_value = "")]
  email: String,
  #[arg(long, default_value = "")]
  telefone: String,
  #[arg(long, default_value = "")]
  endereco: String,
  #[arg(long, default_value = "")]
  celula_id: String,
  #[arg(long, default_value = "")]
  lider_id: String,
}

struct Dashboard {
  config: Config,
  client: ApiClient,
  session: SessionContext,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
  dotenvy::dotenv().ok();
  init_logger();

  let cli = Cli::parse();
  let mut config = Config::from_env();
  if let Some(api_base_url) = cli.api_base_url {
    config.api_base_url = api_base_url;
  }
  tracing::debug!(api = %config.api_base_url, "starting");

  let dashboard = Dashboard {
    client: ApiClient::new(config.api_base_url.clone()),
    session: SessionContext::with_token_file(&config.token_path),
    config,
  };

  match cli.command {
    Commands::Login { username, password } => {
      dashboard.login(username, password).await
    }
    Commands::Logout => dashboard.logout().await,
    Commands::Whoami => dashboard.whoami().await,
    Commands::List { page } => dashboard.list(page).await,
    Commands::Count => dashboard.count().await,
    Commands::Add(args) => dashboard.add(args).await,
  }
}

impl Dashboard {
  fn membro_service(&self) -> Arc<dyn MembroService> {
    Arc::new(HttpMembroService::new(self.client.clone()))
  }

  async fn login(&self, username: String, password: String) -> anyhow::Result<()> {
    let auth = AuthService::new(self.client.clone());
    match auth.login(&self.session, LoginDto { username, password }).await {
      Ok(_) => {
        println!("Login realizado.");
        Ok(())
      }
      Err(DashboardError::Validation(errors)) => {
        print_field_errors(&errors);
        bail!("Dados de login inválidos")
      }
      Err(DashboardError::Request(_)) => bail!("Credenciais inválidas"),
      Err(error) => Err(error.into()),
    }
  }

  async fn logout(&self) -> anyhow::Result<()> {
    AuthService::new(self.client.clone()).logout(&self.session)?;
    let mut hook = UserSession::new();
    let state = hook
      .check_session(&self.session, &UserService::new(self.client.clone()))
      .await;
    if state.status() == AuthStatus::Unauthenticated {
      println!("Sessão encerrada.");
    }
    Ok(())
  }

  async fn whoami(&self) -> anyhow::Result<()> {
    let mut hook = UserSession::new();
    let state = hook
      .check_session(&self.session, &UserService::new(self.client.clone()))
      .await;
    match (state.status(), &state.user, &state.error) {
      (AuthStatus::Authenticated, Some(user), _) => {
        println!("{}", serde_json::to_string_pretty(user)?);
        Ok(())
      }
      (_, _, Some(error)) => bail!("{}", error),
      _ => bail!("Usuário não autenticado"),
    }
  }

  async fn list(&self, page: usize) -> anyhow::Result<()> {
    let mut list = MembroList::new(self.membro_service(), self.config.rows_per_page);
    list.load().await;
    if let Some(error) = list.error() {
      bail!("{}", error);
    }
    list.set_page(page);

    println!(
      "Lista de Membros (página {}, {} por página, {} no total)",
      list.page(),
      list.rows_per_page(),
      list.total()
    );
    for membro in list.rows() {
      println!(
        "{:>5}  {:<30}  {:<10}  {}",
        membro.id.map(|id| id.to_string()).unwrap_or_default(),
        membro.nome,
        membro.cargo,
        membro.email.as_deref().unwrap_or("-")
      );
    }
    Ok(())
  }

  async fn count(&self) -> anyhow::Result<()> {
    let Ok(count) = self.membro_service().count().await else {
      bail!("Erro ao contar membros");
    };
    println!("Total de membros: {}", count.total_records);
    for role in Role::ALL {
      println!("  {:<10} {}", role, count.count_for(role));
    }
    Ok(())
  }

  async fn add(&self, args: AddArgs) -> anyhow::Result<()> {
    let service = self.membro_service();
    let mut list = MembroList::new(service.clone(), self.config.rows_per_page);
    list.load().await;

    let (events_tx, events_rx) = flume::unbounded();
    let form = CreateMembroForm::new(service, self.config.close_delay, events_tx);
    form.open();
    form.update_values(|values| {
      values.nome = args.nome;
      values.cargo = args.cargo;
      values.email = args.email;
      values.telefone = args.telefone;
      values.endereco = args.endereco;
      values.celula_id = IdInput::from(args.celula_id);
      values.lider_id = IdInput::from(args.lider_id);
    })?;

    match form.submit().await {
      Ok(_) => println!("{}", form.success_message().unwrap_or_default()),
      Err(DashboardError::Validation(errors)) => {
        print_field_errors(&errors);
        bail!("Corrija os campos e tente novamente")
      }
      Err(_) => bail!("{}", form.submission_error().unwrap_or_default()),
    }

    while let Ok(event) = events_rx.recv_async().await {
      match event {
        FormEvent::MembroAdded { id } => {
          list.reload().await;
          println!("Membro #{} adicionado ({} na lista).", id, list.total());
        }
        FormEvent::Closed => break,
      }
    }
    Ok(())
  }
}

fn print_field_errors(errors: &[ValidationError]) {
  for error in errors {
    eprintln!("  {}: {}", error.field, error.message);
  }
}
