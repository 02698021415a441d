#[cfg(test)]
mod tests {
    use crate::*;

    #[test]
    fn empty_config_is_all_off() {
        let cfg = load_from_str("()").unwrap();
        assert_eq!(cfg, Config::default());
        assert!(!cfg.flag(Flag::SwapBank));
        assert_eq!(cfg.swap_fairy_ring, FairyRingMode::Off);
    }

    #[test]
    fn toggles_parse() {
        let cfg = load_from_str(
            r#"(
                swap_bank: true,
                swap_assignment: true,
                ui_customization: true,
            )"#,
        )
        .unwrap();
        assert!(cfg.flag(Flag::SwapBank));
        assert!(cfg.flag(Flag::SwapAssignment));
        assert!(cfg.flag(Flag::UiCustomization));
        assert!(!cfg.flag(Flag::SwapTrade));
    }

    #[test]
    fn fairy_ring_modes_parse() {
        for (text, want) in [
            ("(swap_fairy_ring: zanaris)", FairyRingMode::Zanaris),
            (
                "(swap_fairy_ring: last_destination)",
                FairyRingMode::LastDestination,
            ),
            ("(swap_fairy_ring: configure)", FairyRingMode::Configure),
            ("(swap_fairy_ring: off)", FairyRingMode::Off),
        ] {
            assert_eq!(load_from_str(text).unwrap().swap_fairy_ring, want);
        }
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = load_from_str("(swap_banana: true)").unwrap_err();
        match err {
            Error::Parse { path, .. } => assert!(path.is_none()),
            other => panic!("{:?}", other),
        }
    }

    #[test]
    fn non_ron_extension_is_rejected() {
        let err = load_from_path(std::path::Path::new("/tmp/menuki.toml")).unwrap_err();
        assert!(err.pretty().contains("Unsupported config format"));
    }
}
