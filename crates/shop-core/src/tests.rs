//! Unit tests for shop-core primitives.

#[cfg(test)]
mod category {
    use crate::{ActorId, ActorRng, Category, PerCategory};

    #[test]
    fn index_roundtrip() {
        for (i, c) in Category::ALL.iter().enumerate() {
            assert_eq!(c.index(), i);
        }
    }

    #[test]
    fn enumeration_order_is_tie_break_order() {
        assert!(Category::Electronics < Category::Clothing);
        assert!(Category::SportingGoods < Category::Books);
    }

    #[test]
    fn display_uses_upper_case_names() {
        assert_eq!(Category::SportingGoods.to_string(), "SPORTING_GOODS");
        assert_eq!(Category::Toys.to_string(), "TOYS");
    }

    #[test]
    fn random_covers_every_category() {
        let mut rng = ActorRng::new(7, ActorId::Store);
        let mut seen = PerCategory::<usize>::default();
        for _ in 0..2_000 {
            seen[rng.category()] += 1;
        }
        assert!(seen.values().all(|&n| n > 0), "got {seen:?}");
        assert_eq!(seen.total(), 2_000);
    }

    #[test]
    fn per_category_indexing_and_map() {
        let mut counts = PerCategory::from_fn(|c| c.index());
        counts[Category::Books] = 100;
        assert_eq!(counts[Category::Clothing], 1);
        assert_eq!(counts[Category::Books], 100);

        let doubled = counts.map(|_, &n| n * 2);
        assert_eq!(doubled[Category::Furniture], 4);

        let order: Vec<Category> = counts.iter().map(|(c, _)| c).collect();
        assert_eq!(order, Category::ALL.to_vec());
    }
}

#[cfg(test)]
mod ids {
    use crate::{ActorId, AssistantId, CustomerId};

    #[test]
    fn index_roundtrip() {
        let id = CustomerId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(CustomerId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn display() {
        assert_eq!(AssistantId(3).to_string(), "assistant-3");
        assert_eq!(ActorId::from(CustomerId(0)).to_string(), "customer-0");
        assert_eq!(ActorId::Store.to_string(), "store");
    }

    #[test]
    fn streams_never_collide() {
        let mut streams: Vec<u64> = vec![ActorId::Store.stream()];
        for i in 0..50 {
            streams.push(ActorId::Assistant(AssistantId(i)).stream());
            streams.push(ActorId::Customer(CustomerId(i)).stream());
        }
        let before = streams.len();
        streams.sort_unstable();
        streams.dedup();
        assert_eq!(streams.len(), before);
    }
}

#[cfg(test)]
mod rng {
    use crate::{ActorId, ActorRng, AssistantId, CustomerId};

    #[test]
    fn deterministic_same_seed() {
        let actor = ActorId::Customer(CustomerId(4));
        let mut r1 = ActorRng::new(12345, actor);
        let mut r2 = ActorRng::new(12345, actor);
        for _ in 0..100 {
            assert_eq!(r1.category(), r2.category());
            assert_eq!(r1.one_in(7), r2.one_in(7));
        }
    }

    #[test]
    fn different_actors_differ() {
        let mut a = ActorRng::new(1, ActorId::Assistant(AssistantId(0)));
        let mut c = ActorRng::new(1, ActorId::Customer(CustomerId(0)));
        let xs: Vec<_> = (0..32).map(|_| a.category()).collect();
        let ys: Vec<_> = (0..32).map(|_| c.category()).collect();
        assert_ne!(xs, ys, "streams for different actors should diverge");
    }

    #[test]
    fn one_in_one_is_certain() {
        let mut rng = ActorRng::new(0, ActorId::Store);
        assert!((0..100).all(|_| rng.one_in(1)));
    }

    #[test]
    fn one_in_n_is_roughly_one_in_n() {
        let mut rng = ActorRng::new(99, ActorId::Store);
        let hits = (0..10_000).filter(|_| rng.one_in(10)).count();
        assert!((700..1_300).contains(&hits), "got {hits}");
    }
}

#[cfg(test)]
mod time {
    use std::time::Duration;

    use crate::{Clock, ManualClock, StoreClock, Tick};

    #[test]
    fn tick_arithmetic() {
        let t = Tick(10);
        assert_eq!(t.offset(3), Tick(13));
        assert_eq!(t.offset(u64::MAX), Tick(u64::MAX));
        assert_eq!(Tick(7).to_string(), "T7");
    }

    #[test]
    fn store_clock_advances_monotonically() {
        let clock = StoreClock::from_millis(1);
        assert_eq!(clock.now(), Tick::ZERO);
        assert_eq!(clock.advance(), Tick(1));
        assert_eq!(clock.advance(), Tick(2));
        assert_eq!(clock.now(), Tick(2));
        assert_eq!(clock.tick_duration(), Duration::from_millis(1));
    }

    #[test]
    fn manual_clock_records_sleeps_without_waiting() {
        let clock = ManualClock::new(Duration::from_secs(3600));
        clock.sleep_ticks(10);
        clock.sleep_ticks(5);
        assert_eq!(clock.slept_ticks(), 15);
        assert_eq!(clock.slept(), Duration::from_secs(15 * 3600));
    }

    #[test]
    fn manual_clock_set_and_advance() {
        let clock = ManualClock::new(Duration::from_millis(10));
        clock.set(Tick(41));
        assert_eq!(clock.advance(), Tick(42));
        assert_eq!(clock.now(), Tick(42));
    }
}

#[cfg(test)]
mod config {
    use crate::{ConfigError, StoreConfig};

    const FULL: &str = "\
MAX_CARRIED_ITEMS=5
MAX_CARRIED_SECTIONS=2
BREAK_INTERVAL=50
BREAK_TIME=10
BUY_INTERVAL=20
INITIAL_ITEMS=3
TICK_TIME=25
DELIVERY_INTERVAL=80
ITEMS_PER_DELIVERY=12
ASSISTANTS=4
CUSTOMERS=9
";

    #[test]
    fn parses_properties_format() {
        let cfg = StoreConfig::from_toml_str(FULL).unwrap();
        assert_eq!(cfg.max_carried_items, 5);
        assert_eq!(cfg.max_carried_sections, 2);
        assert_eq!(cfg.tick_time_ms, 25);
        assert_eq!(cfg.customers, 9);
        assert_eq!(cfg.seed, 0);
        cfg.validate().unwrap();
    }

    #[test]
    fn seed_is_optional_but_honoured() {
        let cfg = StoreConfig::from_toml_str(&format!("{FULL}SEED = 77\n")).unwrap();
        assert_eq!(cfg.seed, 77);
    }

    #[test]
    fn missing_key_is_reported_by_name() {
        let text = FULL.replace("CUSTOMERS=9\n", "");
        match StoreConfig::from_toml_str(&text) {
            Err(ConfigError::Missing(key)) => assert_eq!(key, "CUSTOMERS"),
            other => panic!("expected Missing, got {other:?}"),
        }
    }

    #[test]
    fn zero_and_negative_values_are_rejected() {
        let zero = FULL.replace("BUY_INTERVAL=20", "BUY_INTERVAL=0");
        assert!(matches!(
            StoreConfig::from_toml_str(&zero),
            Err(ConfigError::NonPositive { key: "BUY_INTERVAL", value: 0 })
        ));

        let negative = FULL.replace("ASSISTANTS=4", "ASSISTANTS=-2");
        assert!(matches!(
            StoreConfig::from_toml_str(&negative),
            Err(ConfigError::NonPositive { key: "ASSISTANTS", value: -2 })
        ));
    }

    #[test]
    fn values_too_large_for_the_field_are_rejected() {
        let huge = FULL.replace("BREAK_INTERVAL=50", "BREAK_INTERVAL=99999999999");
        assert!(matches!(
            StoreConfig::from_toml_str(&huge),
            Err(ConfigError::OutOfRange { key: "BREAK_INTERVAL", .. })
        ));
    }

    #[test]
    fn garbage_is_a_parse_error() {
        assert!(matches!(
            StoreConfig::from_toml_str("MAX_CARRIED_ITEMS = = 3"),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn validate_catches_zero_in_code_built_config() {
        let cfg = StoreConfig { max_carried_sections: 0, ..StoreConfig::default() };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::NonPositive { key: "MAX_CARRIED_SECTIONS", .. })
        ));
        StoreConfig::default().validate().unwrap();
    }

    #[test]
    fn from_dir_merges_role_files() {
        let dir = tempfile::tempdir().expect("create temp dir");
        std::fs::write(
            dir.path().join("Store.config"),
            "INITIAL_ITEMS=5\nTICK_TIME=100\nDELIVERY_INTERVAL=100\nITEMS_PER_DELIVERY=10\nASSISTANTS=2\nCUSTOMERS=5\nBUY_INTERVAL=99\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("Assistant.config"),
            "# assistants\nMAX_CARRIED_ITEMS=10\nMAX_CARRIED_SECTIONS=3\nBREAK_INTERVAL=100\nBREAK_TIME=20\n",
        )
        .unwrap();
        std::fs::write(dir.path().join("Customer.config"), "BUY_INTERVAL=10\n").unwrap();

        let cfg = StoreConfig::from_dir(dir.path()).unwrap();
        assert_eq!(cfg.max_carried_items, 10);
        assert_eq!(cfg.assistants, 2);
        // Customer.config is read last and overrides Store.config.
        assert_eq!(cfg.buy_interval, 10);
    }

    #[test]
    fn from_dir_without_files_errors() {
        let dir = tempfile::tempdir().expect("create temp dir");
        assert!(matches!(
            StoreConfig::from_dir(dir.path()),
            Err(ConfigError::NoConfigFiles(_))
        ));
    }

    #[test]
    fn from_path_missing_file_is_io_error() {
        let dir = tempfile::tempdir().expect("create temp dir");
        assert!(matches!(
            StoreConfig::from_path(&dir.path().join("nope.config")),
            Err(ConfigError::Io { .. })
        ));
    }
}

#[cfg(test)]
mod event {
    use std::sync::Arc;

    use crate::{
        ActorId, Category, EventKind, EventSink, NoopSink, PickReason, RecordingSink, StoreEvent,
        Tick,
    };

    fn bought(tick: u64) -> StoreEvent {
        StoreEvent {
            tick:  Tick(tick),
            actor: ActorId::Store,
            kind:  EventKind::Bought { category: Category::Toys, waited_ticks: 0 },
        }
    }

    #[test]
    fn recording_sink_keeps_order() {
        let sink = RecordingSink::new();
        sink.emit(bought(1));
        sink.emit(bought(2));
        let ticks: Vec<Tick> = sink.events().iter().map(|e| e.tick).collect();
        assert_eq!(ticks, [Tick(1), Tick(2)]);
        assert_eq!(sink.take().len(), 2);
        assert!(sink.is_empty());
    }

    #[test]
    fn tuple_sink_fans_out() {
        let a = Arc::new(RecordingSink::new());
        let b = Arc::new(RecordingSink::new());
        let both = (a.clone(), b.clone());
        both.emit(bought(3));
        assert_eq!(a.len(), 1);
        assert_eq!(b.len(), 1);
        (NoopSink, a.clone()).emit(bought(4));
        assert_eq!(a.len(), 2);
    }

    #[test]
    fn labels_and_categories() {
        let taken = EventKind::ItemsTaken {
            category: Category::Books,
            count:    3,
            reason:   PickReason::LargestBacklog,
        };
        assert_eq!(taken.label(), "items_taken");
        assert_eq!(taken.category(), Some(Category::Books));
        assert_eq!(EventKind::BoxNoticed.category(), None);
    }
}
