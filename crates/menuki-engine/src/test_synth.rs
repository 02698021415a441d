#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use config::Config;
    use crossbeam_channel::{Receiver, unbounded};
    use menuki_protocol::{
        BindingKey, BindingStore, ClickChannel, Entry, HandlerId, Notice, WidgetRef,
    };

    use crate::{
        Engine,
        test_support::{FakeHost, FakeWorld, MemoryBindings, cancel, npc, widget_item},
    };

    const AIR_RUNE: &str = "Air rune";
    const AIR_RUNE_ID: u32 = 556;
    const BANK_WIDGET: u64 = 9;

    const BANK_ACTIONS: [&str; 8] = [
        "Withdraw-1",
        "Withdraw-5",
        "Withdraw-10",
        "Withdraw-16",
        "Withdraw-X",
        "Withdraw-All",
        "Withdraw-All-but-1",
        "Examine",
    ];

    /// The bank menu as the client regenerates it on every open.
    fn bank_menu() -> Vec<Entry> {
        vec![
            cancel(),
            widget_item("Examine", AIR_RUNE, 8, AIR_RUNE_ID, BANK_WIDGET),
            widget_item("Withdraw-All-but-1", AIR_RUNE, 7, AIR_RUNE_ID, BANK_WIDGET),
            widget_item("Withdraw-All", AIR_RUNE, 6, AIR_RUNE_ID, BANK_WIDGET),
            widget_item("Withdraw-X", AIR_RUNE, 5, AIR_RUNE_ID, BANK_WIDGET),
            widget_item("Withdraw-16", AIR_RUNE, 4, AIR_RUNE_ID, BANK_WIDGET),
            widget_item("Withdraw-10", AIR_RUNE, 3, AIR_RUNE_ID, BANK_WIDGET),
            widget_item("Withdraw-5", AIR_RUNE, 2, AIR_RUNE_ID, BANK_WIDGET),
            widget_item("Withdraw-1", AIR_RUNE, 1, AIR_RUNE_ID, BANK_WIDGET),
        ]
    }

    /// Engine plus handles to its collaborators.
    struct Rig {
        host: Arc<FakeHost>,
        bindings: Arc<MemoryBindings>,
        #[allow(dead_code)]
        rx: Receiver<Notice>,
        engine: Engine,
    }

    fn rig() -> Rig {
        let host = Arc::new(FakeHost::new(bank_menu()));
        let bindings = Arc::new(MemoryBindings::new());
        let world = Arc::new(FakeWorld::new());
        world.set_widget_actions(WidgetRef(BANK_WIDGET), &BANK_ACTIONS);
        let (tx, rx) = unbounded();
        let mut engine = Engine::new(host.clone(), bindings.clone(), world, tx);
        engine.set_config(Config {
            ui_customization: true,
            ..Config::default()
        });
        Rig {
            host,
            bindings,
            rx,
            engine,
        }
    }

    /// Handler id of the current entry with `label`.
    fn handler_of(host: &FakeHost, label: &str) -> HandlerId {
        host.current()
            .iter()
            .find(|e| e.label == label)
            .and_then(|e| e.handler)
            .unwrap_or_else(|| panic!("no synthetic entry labeled {label:?}"))
    }

    #[test]
    fn unbound_menu_gets_swap_entries_above_the_block() {
        let mut r = rig();
        r.engine.on_menu_opened();

        assert_eq!(r.host.commit_count(), 1);
        assert_eq!(
            r.host.labels(),
            vec![
                "Cancel",
                "Swap shift click Withdraw-All-but-1",
                "Swap shift click Withdraw-All",
                "Swap shift click Withdraw-X",
                "Swap shift click Withdraw-16",
                "Swap shift click Withdraw-10",
                "Swap shift click Withdraw-5",
                "Swap left click Withdraw-All-but-1",
                "Swap left click Withdraw-All",
                "Swap left click Withdraw-X",
                "Swap left click Withdraw-16",
                "Swap left click Withdraw-10",
                "Swap left click Withdraw-5",
                "Examine",
                "Withdraw-All-but-1",
                "Withdraw-All",
                "Withdraw-X",
                "Withdraw-16",
                "Withdraw-10",
                "Withdraw-5",
                "Withdraw-1",
            ]
        );
    }

    #[test]
    fn shift_binding_round_trip() {
        let mut r = rig();
        r.engine.on_menu_opened();
        let handler = handler_of(&r.host, "Swap shift click Withdraw-5");
        r.engine.activate(handler);

        assert_eq!(
            r.bindings
                .get(&BindingKey::item(AIR_RUNE_ID), ClickChannel::Shift),
            Some("Withdraw-5".to_string())
        );

        // The client regenerates the menu; the next shift-held tick places
        // the bound option at the default slot.
        r.host.install(bank_menu());
        r.host.set_shift(true);
        r.engine.on_frame_tick();
        assert_eq!(r.host.commit_count(), 2);
        assert_eq!(
            r.host.labels().last().map(String::as_str),
            Some("Withdraw-5")
        );

        // Converged: further ticks are no-ops.
        r.engine.on_frame_tick();
        assert_eq!(r.host.commit_count(), 2);

        // The primary channel is unbound, so releasing shift disarms the
        // promotion entirely.
        r.host.install(bank_menu());
        r.host.set_shift(false);
        r.engine.on_frame_tick();
        assert_eq!(r.host.commit_count(), 2);
    }

    #[test]
    fn reopening_after_binding_offers_reset_and_drops_the_bound_option() {
        let mut r = rig();
        r.engine.on_menu_opened();
        r.engine
            .activate(handler_of(&r.host, "Swap shift click Withdraw-5"));

        r.host.install(bank_menu());
        r.engine.on_menu_opened();

        assert_eq!(
            r.host.labels(),
            vec![
                "Cancel",
                "Reset swap",
                "Swap shift click Withdraw-All-but-1",
                "Swap shift click Withdraw-All",
                "Swap shift click Withdraw-X",
                "Swap shift click Withdraw-16",
                "Swap shift click Withdraw-10",
                "Swap left click Withdraw-All-but-1",
                "Swap left click Withdraw-All",
                "Swap left click Withdraw-X",
                "Swap left click Withdraw-16",
                "Swap left click Withdraw-10",
                "Swap left click Withdraw-5",
                "Examine",
                "Withdraw-All-but-1",
                "Withdraw-All",
                "Withdraw-X",
                "Withdraw-16",
                "Withdraw-10",
                "Withdraw-5",
                "Withdraw-1",
            ]
        );
    }

    #[test]
    fn left_binding_converges_over_frames() {
        let mut r = rig();
        r.engine.on_menu_opened();
        r.engine
            .activate(handler_of(&r.host, "Swap left click Withdraw-10"));

        // Withdraw-10 sits two steps from the default slot: one adjacent
        // step per frame, one commit each, then quiet.
        r.host.install(bank_menu());
        r.engine.on_frame_tick();
        assert_eq!(
            r.host.labels()[5..],
            ["Withdraw-16", "Withdraw-5", "Withdraw-10", "Withdraw-1"]
        );
        r.engine.on_frame_tick();
        assert_eq!(
            r.host.labels()[5..],
            ["Withdraw-16", "Withdraw-5", "Withdraw-1", "Withdraw-10"]
        );
        r.engine.on_frame_tick();
        assert_eq!(r.host.commit_count(), 3);
    }

    #[test]
    fn reset_swap_clears_both_channels() {
        let mut r = rig();
        r.engine.on_menu_opened();
        r.engine
            .activate(handler_of(&r.host, "Swap shift click Withdraw-5"));
        r.engine
            .activate(handler_of(&r.host, "Swap left click Withdraw-10"));
        assert_eq!(r.bindings.len(), 2);

        r.host.install(bank_menu());
        r.engine.on_menu_opened();
        r.engine.activate(handler_of(&r.host, "Reset swap"));
        assert!(r.bindings.is_empty());

        // No binding-driven promotion in either modifier state.
        let commits = r.host.commit_count();
        r.host.install(bank_menu());
        r.host.set_shift(true);
        r.engine.on_frame_tick();
        r.host.set_shift(false);
        r.engine.on_frame_tick();
        assert_eq!(r.host.commit_count(), commits);

        // And the reset entry is gone from the next menu.
        r.engine.on_menu_opened();
        assert!(!r.host.labels().iter().any(|l| l == "Reset swap"));
    }

    #[test]
    fn stale_handlers_are_ignored() {
        let mut r = rig();
        r.engine.on_menu_opened();
        let stale = handler_of(&r.host, "Swap shift click Withdraw-5");

        // A new menu generation rebuilds the handler table.
        r.host.install(bank_menu());
        r.engine.on_menu_opened();
        r.engine.activate(stale);
        assert!(r.bindings.is_empty());
    }

    #[test]
    fn binding_write_survives_menu_contents_changing() {
        let mut r = rig();
        r.engine.on_menu_opened();
        let handler = handler_of(&r.host, "Swap left click Withdraw-10");

        // The menu the entry came from is gone, but bindings are keyed by
        // subject identity, not entry instance: the write still lands.
        r.host
            .install(vec![cancel(), npc("Talk-to", "Duradel", 1, 1)]);
        r.engine.activate(handler);
        assert_eq!(
            r.bindings
                .get(&BindingKey::item(AIR_RUNE_ID), ClickChannel::Primary),
            Some("Withdraw-10".to_string())
        );
    }

    #[test]
    fn disabled_synthesizer_is_a_no_op() {
        let mut r = rig();
        r.engine.set_config(Config::default());
        r.engine.on_menu_opened();
        assert_eq!(r.host.commit_count(), 0);
        assert_eq!(r.host.current(), bank_menu());
    }

    #[test]
    fn menus_without_quantity_blocks_are_left_alone() {
        let mut r = rig();
        // NPC menus have no widget vocabulary to configure.
        r.host.install(vec![
            cancel(),
            npc("Bank", "Gnome banker", 3, 1),
            npc("Talk-to", "Gnome banker", 1, 1),
        ]);
        r.engine.on_menu_opened();
        assert_eq!(r.host.commit_count(), 0);

        // A widget whose vocabulary has a single quantity action offers no
        // choice either.
        let world = FakeWorld::new();
        world.set_widget_actions(WidgetRef(7), &["Withdraw-1", "Examine"]);
        let host = Arc::new(FakeHost::new(vec![
            cancel(),
            widget_item("Withdraw-1", "Coal", 17, 453, 7),
        ]));
        let (tx, _rx) = unbounded();
        let mut engine = Engine::new(
            host.clone(),
            Arc::new(MemoryBindings::new()),
            Arc::new(world),
            tx,
        );
        engine.set_config(Config {
            ui_customization: true,
            ..Config::default()
        });
        engine.on_menu_opened();
        assert_eq!(host.commit_count(), 0);
    }

    #[test]
    fn each_configurable_block_gets_its_own_header() {
        let world = FakeWorld::new();
        world.set_widget_actions(WidgetRef(12), &["Withdraw-1", "Withdraw-5", "Examine"]);
        world.set_widget_actions(WidgetRef(11), &["Deposit-1", "Deposit-All", "Examine"]);

        let host = Arc::new(FakeHost::new(vec![
            cancel(),
            widget_item("Withdraw-5", "Coins", 2, 995, 12),
            widget_item("Withdraw-1", "Coins", 1, 995, 12),
            widget_item("Deposit-1", "Iron ore", 1, 440, 11),
        ]));
        let (tx, _rx) = unbounded();
        let mut engine = Engine::new(
            host.clone(),
            Arc::new(MemoryBindings::new()),
            Arc::new(world),
            tx,
        );
        engine.set_config(Config {
            ui_customization: true,
            ..Config::default()
        });
        engine.on_menu_opened();

        assert_eq!(
            host.labels(),
            vec![
                "Cancel",
                "Swap shift click Withdraw-5",
                "Swap left click Withdraw-5",
                "Withdraw-5",
                "Withdraw-1",
                "Swap shift click Deposit-All",
                "Swap left click Deposit-All",
                "Deposit-1",
            ]
        );
    }
}
