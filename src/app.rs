use std::{
    path::Path,
    sync::{mpsc, Arc},
};

use anyhow::{anyhow, Result};

use crate::{
    cli::{Cli, Command},
    domain::{
        self,
        order::{format_vnd, Order},
        session::SessionId,
        shell_state::ShellState,
        transcript_state::TranscriptState,
    },
    history, infra, ui,
    usecases::{
        self, bootstrap,
        contracts::HistoryStore,
        fetch_orders::{fetch_orders, FetchOrdersError},
        init_session::{init_session, InitMode},
        shell::{DefaultShellOrchestrator, ThreadTurnDispatcher},
    },
};

const OFFLINE_NOTICE: &str = "Offline: messages are not being saved";

pub fn run(cli: Cli) -> Result<()> {
    match cli.command_or_default() {
        Command::Run => run_chat(cli.config.as_deref()),
        Command::Orders => run_orders(cli.config.as_deref()),
    }
}

fn run_chat(config_path: Option<&Path>) -> Result<()> {
    let bootstrap::Bootstrap {
        context,
        log_guard: _log_guard,
    } = bootstrap::bootstrap(config_path)?;

    tracing::debug!(
        ui = ui::module_name(),
        domain = domain::module_name(),
        history = history::module_name(),
        usecases = usecases::module_name(),
        infra = infra::module_name(),
        "module boundaries loaded"
    );

    let session_id = SessionId::generate();
    tracing::info!(
        %session_id,
        base_url = %context.config.server.base_url,
        "starting chat session"
    );

    let init = init_session(context.api.as_ref(), &session_id);
    let mut state = ShellState::new(TranscriptState::from_messages(init.transcript));
    match &init.mode {
        InitMode::Restored => tracing::debug!("transcript restored from the store"),
        InitMode::Welcomed => tracing::debug!("welcome message persisted"),
        InitMode::Offline(error) => {
            tracing::warn!(error = %error, "history unavailable, using local welcome");
            state.set_notice(OFFLINE_NOTICE);
        }
    }

    let (turn_sender, turn_receiver) = mpsc::channel();
    let store: Arc<dyn HistoryStore + Send + Sync> = context.api.clone();
    let dispatcher = ThreadTurnDispatcher::new(store, turn_sender);
    let mut orchestrator = DefaultShellOrchestrator::new(state, dispatcher, session_id);
    let mut event_source = ui::TerminalEventSource::new(turn_receiver);

    ui::shell::start(&mut event_source, &mut orchestrator)
}

fn run_orders(config_path: Option<&Path>) -> Result<()> {
    let bootstrap::Bootstrap {
        context,
        log_guard: _log_guard,
    } = bootstrap::bootstrap(config_path)?;

    let orders = fetch_orders(context.api.as_ref()).map_err(describe_fetch_error)?;
    tracing::info!(count = orders.len(), "fetched orders");

    if orders.is_empty() {
        println!("No orders yet.");
        return Ok(());
    }

    for order in &orders {
        for line in order_lines(order) {
            println!("{line}");
        }
        println!();
    }

    Ok(())
}

fn describe_fetch_error(error: FetchOrdersError) -> anyhow::Error {
    match error {
        FetchOrdersError::TemporarilyUnavailable { reason } => {
            anyhow!("order service unavailable: {reason}")
        }
        FetchOrdersError::DataContractViolation { reason } => {
            anyhow!("order service returned malformed data: {reason}")
        }
    }
}

fn order_lines(order: &Order) -> Vec<String> {
    let mut lines = vec![
        format!(
            "#{} {} [{}]",
            order.id,
            order.customer_name,
            order.status.display_label()
        ),
        format!("  Phone:    {}", order.phone),
        format!("  Delivery: {} | {}", order.delivery_time, order.address),
    ];

    if !order.line_items.is_empty() {
        lines.push(format!(
            "  Items:    {} (x{})",
            order.items_summary(),
            order.total_quantity()
        ));
    }

    lines.push(format!("  Total:    {}", format_vnd(order.total_price)));

    if !order.notes.is_empty() {
        lines.push(format!("  Notes:    {}", order.notes));
    }

    lines
}
