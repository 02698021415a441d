//! Scripted scenarios driven through the real engine.

use std::sync::Arc;

use config::Config;
use crossbeam_channel::{Receiver, unbounded};
use menuki_engine::{
    Engine,
    test_support::{FakeHost, FakeWorld, MemoryBindings, cancel, examine_npc, npc, walk, widget_item},
};
use menuki_protocol::{Notice, WidgetRef};
use tracing::info;

/// Outcome of one scripted case.
pub type CaseResult = Result<(), String>;

/// Every case, in execution order.
pub const ALL: &[(&str, fn() -> CaseResult)] = &[
    ("slayer-master", slayer_master),
    ("banker-pair", banker_pair),
    ("bank-quantity-binding", bank_quantity_binding),
];

/// Fail the case with `what` unless `cond` holds.
fn expect(cond: bool, what: &str) -> CaseResult {
    if cond { Ok(()) } else { Err(what.to_string()) }
}

/// Engine wired to fresh fakes with the given menu and config. The notice
/// receiver rides along so the channel stays open for the engine's lifetime.
fn engine(
    host: &Arc<FakeHost>,
    world: Arc<FakeWorld>,
    bindings: Arc<MemoryBindings>,
    config: Config,
) -> (Engine, Receiver<Notice>) {
    let (tx, rx) = unbounded();
    let mut engine = Engine::new(host.clone(), bindings, world, tx);
    engine.set_config(config);
    (engine, rx)
}

/// Higher-priority assignment swap wins over trade on the same NPC.
fn slayer_master() -> CaseResult {
    let host = Arc::new(FakeHost::new(vec![
        cancel(),
        npc("Rewards", "Duradel", 5, 1),
        npc("Trade", "Duradel", 4, 1),
        npc("Assignment", "Duradel", 3, 1),
        npc("Talk-to", "Duradel", 1, 1),
    ]));
    let (mut engine, _rx) = engine(
        &host,
        Arc::new(FakeWorld::new()),
        Arc::new(MemoryBindings::new()),
        Config {
            swap_trade: true,
            swap_assignment: true,
            ..Config::default()
        },
    );

    engine.on_frame_tick();
    info!(labels = ?host.labels(), "after tick");
    expect(host.commit_count() == 1, "expected exactly one commit")?;
    expect(
        host.labels() == ["Cancel", "Rewards", "Trade", "Talk-to", "Assignment"],
        "assignment should hold the default slot",
    )
}

/// Two same-named bankers converge independently, one commit each.
fn banker_pair() -> CaseResult {
    let banker = "Gnome banker";
    let host = Arc::new(FakeHost::new(vec![
        cancel(),
        examine_npc(banker, 2),
        examine_npc(banker, 1),
        walk(),
        npc("Collect", banker, 4, 2),
        npc("Bank", banker, 3, 2),
        npc("Talk-to", banker, 1, 2),
        npc("Collect", banker, 4, 1),
        npc("Bank", banker, 3, 1),
        npc("Talk-to", banker, 1, 1),
    ]));
    let (mut engine, _rx) = engine(
        &host,
        Arc::new(FakeWorld::new()),
        Arc::new(MemoryBindings::new()),
        Config {
            swap_bank: true,
            ..Config::default()
        },
    );

    engine.on_frame_tick();
    info!(labels = ?host.labels(), "after tick");
    expect(host.commit_count() == 2, "expected one commit per banker")?;
    expect(
        host.labels()
            == [
                "Cancel", "Examine", "Examine", "Walk here", "Collect", "Talk-to", "Bank",
                "Collect", "Talk-to", "Bank",
            ],
        "both bank options should hold their block's default slot",
    )?;

    // Already satisfied: the next frame must not commit again.
    engine.on_frame_tick();
    expect(host.commit_count() == 2, "converged frame must be a no-op")
}

/// Bind a withdraw quantity through the synthesized submenu, watch the next
/// shift-held tick promote it, then reset.
fn bank_quantity_binding() -> CaseResult {
    let air_rune = "Air rune";
    let menu = || {
        vec![
            cancel(),
            widget_item("Examine", air_rune, 8, 556, 9),
            widget_item("Withdraw-All-but-1", air_rune, 7, 556, 9),
            widget_item("Withdraw-All", air_rune, 6, 556, 9),
            widget_item("Withdraw-X", air_rune, 5, 556, 9),
            widget_item("Withdraw-16", air_rune, 4, 556, 9),
            widget_item("Withdraw-10", air_rune, 3, 556, 9),
            widget_item("Withdraw-5", air_rune, 2, 556, 9),
            widget_item("Withdraw-1", air_rune, 1, 556, 9),
        ]
    };
    let host = Arc::new(FakeHost::new(menu()));
    let world = Arc::new(FakeWorld::new());
    world.set_widget_actions(
        WidgetRef(9),
        &[
            "Withdraw-1",
            "Withdraw-5",
            "Withdraw-10",
            "Withdraw-16",
            "Withdraw-X",
            "Withdraw-All",
            "Withdraw-All-but-1",
            "Examine",
        ],
    );
    let bindings = Arc::new(MemoryBindings::new());
    let (mut engine, _rx) = engine(
        &host,
        world,
        bindings.clone(),
        Config {
            ui_customization: true,
            ..Config::default()
        },
    );

    engine.on_menu_opened();
    info!(labels = ?host.labels(), "after open");
    let swap_entry = host
        .current()
        .into_iter()
        .find(|e| e.label == "Swap shift click Withdraw-5")
        .ok_or("missing synthesized swap entry")?;
    engine.activate(swap_entry.handler.ok_or("synthetic entry without handler")?);
    expect(bindings.len() == 1, "activation should persist one binding")?;

    host.install(menu());
    host.set_shift(true);
    engine.on_frame_tick();
    info!(labels = ?host.labels(), "after shift tick");
    expect(
        host.labels().last().map(String::as_str) == Some("Withdraw-5"),
        "bound option should hold the default slot while shift is held",
    )?;

    host.install(menu());
    host.set_shift(false);
    engine.on_frame_tick();
    expect(
        host.labels().last().map(String::as_str) == Some("Withdraw-1"),
        "primary channel is unbound and must stay untouched",
    )?;

    // Reset clears both channels; the reopened menu offers no reset entry.
    engine.on_menu_opened();
    let reset = host
        .current()
        .into_iter()
        .find(|e| e.label == "Reset swap")
        .ok_or("missing reset entry")?;
    engine.activate(reset.handler.ok_or("reset entry without handler")?);
    expect(bindings.is_empty(), "reset should clear all bindings")?;

    host.install(menu());
    host.set_shift(true);
    let commits = host.commit_count();
    engine.on_frame_tick();
    expect(
        host.commit_count() == commits,
        "no promotion may remain after reset",
    )
}
