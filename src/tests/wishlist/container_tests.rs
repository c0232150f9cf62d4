    use std::cell::{Cell, RefCell};

    use super::*;

    #[derive(Clone, Debug, PartialEq, Eq)]
    enum Call {
        List,
        Add(String),
        Remove(String),
    }

    /// In-memory stand-in for the wishlist endpoints that records every call.
    #[derive(Default)]
    struct FakeRemote {
        stored: RefCell<Vec<ListingId>>,
        calls: RefCell<Vec<Call>>,
        fail: Cell<bool>,
    }

    impl FakeRemote {
        fn with_stored(ids: &[&str]) -> Self {
            let remote = Self::default();
            *remote.stored.borrow_mut() = ids.iter().map(|s| ListingId::from(*s)).collect();
            remote
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.borrow().clone()
        }

        fn stored(&self) -> Vec<String> {
            self.stored.borrow().iter().map(|i| i.0.clone()).collect()
        }
    }

    impl WishlistRemote for FakeRemote {
        fn list(&self, _session: &Session) -> Result<Vec<ListingId>> {
            self.calls.borrow_mut().push(Call::List);
            if self.fail.get() {
                anyhow::bail!("connection refused");
            }
            Ok(self.stored.borrow().clone())
        }

        fn add(&self, _session: &Session, id: &ListingId) -> Result<()> {
            self.calls.borrow_mut().push(Call::Add(id.0.clone()));
            if self.fail.get() {
                anyhow::bail!("connection refused");
            }
            let mut stored = self.stored.borrow_mut();
            if !stored.contains(id) {
                stored.push(id.clone());
            }
            Ok(())
        }

        fn remove(&self, _session: &Session, id: &ListingId) -> Result<()> {
            self.calls.borrow_mut().push(Call::Remove(id.0.clone()));
            if self.fail.get() {
                anyhow::bail!("connection refused");
            }
            self.stored.borrow_mut().retain(|e| e != id);
            Ok(())
        }
    }

    fn id(s: &str) -> ListingId {
        ListingId::from(s)
    }

    fn stored_json(storage: &MemoryStorage) -> Option<String> {
        storage.get_item(WISHLIST_STORAGE_KEY).expect("read storage")
    }

    fn guest() -> Wishlist<MemoryStorage, FakeRemote> {
        Wishlist::new(MemoryStorage::new(), FakeRemote::default())
    }

    #[test]
    fn toggle_parity_decides_membership() {
        let mut w = guest();
        let a = id("A");
        for n in 1..=7 {
            w.toggle(&a);
            assert_eq!(w.is_wishlisted(&a), n % 2 == 1, "after {} toggles", n);
        }
    }

    #[test]
    fn toggles_on_different_ids_are_independent() {
        let mut w = guest();
        w.toggle(&id("A"));
        w.toggle(&id("B"));
        w.toggle(&id("A"));
        assert!(!w.is_wishlisted(&id("A")));
        assert!(w.is_wishlisted(&id("B")));
        assert_eq!(w.len(), 1);
    }

    #[test]
    fn set_wishlist_replaces_membership_and_drops_duplicates() {
        let mut w = guest();
        w.toggle(&id("old"));
        w.set_wishlist(vec![id("a"), id("b"), id("a")]);
        assert!(w.is_wishlisted(&id("a")));
        assert!(w.is_wishlisted(&id("b")));
        assert!(!w.is_wishlisted(&id("old")));
        assert!(!w.is_wishlisted(&id("c")));
        assert_eq!(w.entries(), &[id("a"), id("b")]);
    }

    #[test]
    fn clear_wishlist_forgets_every_entry() {
        let mut w = guest();
        w.set_wishlist(vec![id("a"), id("b")]);
        w.clear_wishlist();
        assert!(w.is_empty());
        assert!(!w.is_wishlisted(&id("a")));
        assert!(!w.is_wishlisted(&id("b")));
    }

    #[test]
    fn guest_toggle_writes_through_to_local_storage() {
        let mut w = guest();
        w.toggle(&id("A"));
        assert_eq!(stored_json(w.local().storage()).as_deref(), Some(r#"["A"]"#));
        w.toggle(&id("A"));
        assert_eq!(stored_json(w.local().storage()).as_deref(), Some("[]"));
        assert!(w.remote().calls().is_empty());
    }

    #[test]
    fn guest_clear_removes_storage_key() {
        let mut w = guest();
        w.toggle(&id("A"));
        w.clear_wishlist();
        assert_eq!(stored_json(w.local().storage()), None);
    }

    #[test]
    fn guest_mount_reads_local_storage() {
        let storage = MemoryStorage::new();
        storage
            .set_item(WISHLIST_STORAGE_KEY, r#"["x","y","x"]"#)
            .expect("seed storage");
        let mut w = Wishlist::new(storage, FakeRemote::default());
        assert!(w.mount().is_none());
        assert_eq!(w.entries(), &[id("x"), id("y")]);
        assert_eq!(w.phase(), SessionPhase::Guest);
    }

    #[test]
    fn guest_mount_survives_corrupt_storage() {
        let storage = MemoryStorage::new();
        storage
            .set_item(WISHLIST_STORAGE_KEY, "{not json")
            .expect("seed storage");
        let mut w = Wishlist::new(storage, FakeRemote::default());
        w.mount();
        assert!(w.is_empty());
    }

    #[test]
    fn login_pushes_local_entries_then_clears_storage() {
        let storage = MemoryStorage::new();
        storage
            .set_item(WISHLIST_STORAGE_KEY, r#"["A","B"]"#)
            .expect("seed storage");
        let mut w = Wishlist::new(storage, FakeRemote::default());
        w.mount();

        let report = w
            .set_session(Some(Session::new("tok")))
            .expect("login runs sync");
        assert_eq!(report.pushed, vec![id("A"), id("B")]);
        assert!(report.failed.is_empty());

        let calls = w.remote().calls();
        assert!(calls.contains(&Call::Add("A".to_string())));
        assert!(calls.contains(&Call::Add("B".to_string())));
        assert_eq!(stored_json(w.local().storage()), None);
        assert_eq!(w.phase(), SessionPhase::Authenticated);
        assert!(w.is_wishlisted(&id("A")));
        assert!(w.is_wishlisted(&id("B")));
    }

    #[test]
    fn login_adopts_remote_list() {
        let mut w = Wishlist::new(MemoryStorage::new(), FakeRemote::with_stored(&["r1"]));
        w.toggle(&id("g1"));
        w.set_session(Some(Session::new("tok")));
        assert_eq!(w.remote().stored(), vec!["r1", "g1"]);
        assert_eq!(w.entries(), &[id("r1"), id("g1")]);
    }

    #[test]
    fn login_keeps_guest_entries_when_remote_is_down() {
        let mut w = guest();
        w.toggle(&id("A"));
        w.remote().fail.set(true);

        let report = w.set_session(Some(Session::new("tok"))).expect("sync report");
        assert_eq!(report.failed, vec![id("A")]);
        assert!(w.is_wishlisted(&id("A")));
        assert_eq!(stored_json(w.local().storage()), None);
    }

    #[test]
    fn authenticated_toggle_goes_to_remote_only() {
        let mut w = Wishlist::with_session(
            MemoryStorage::new(),
            FakeRemote::default(),
            Some(Session::new("tok")),
        );
        w.toggle(&id("A"));
        w.toggle(&id("A"));
        assert_eq!(
            w.remote().calls(),
            vec![Call::Add("A".to_string()), Call::Remove("A".to_string())]
        );
        assert_eq!(stored_json(w.local().storage()), None);
    }

    #[test]
    fn remote_failure_keeps_optimistic_state() {
        let mut w = Wishlist::with_session(
            MemoryStorage::new(),
            FakeRemote::default(),
            Some(Session::new("tok")),
        );
        w.remote().fail.set(true);
        w.toggle(&id("A"));
        assert!(w.is_wishlisted(&id("A")));
        assert!(w.remote().stored().is_empty());

        w.remove_wishlist(&id("A"));
        assert!(!w.is_wishlisted(&id("A")));
    }

    #[test]
    fn authenticated_mount_fetches_remote() {
        let mut w = Wishlist::with_session(
            MemoryStorage::new(),
            FakeRemote::with_stored(&["r1", "r2"]),
            Some(Session::new("tok")),
        );
        assert!(w.mount().is_none());
        assert_eq!(w.entries(), &[id("r1"), id("r2")]);
        assert_eq!(w.remote().calls(), vec![Call::List]);
    }

    #[test]
    fn authenticated_mount_finishes_interrupted_sync() {
        let storage = MemoryStorage::new();
        storage
            .set_item(WISHLIST_STORAGE_KEY, r#"["left"]"#)
            .expect("seed storage");
        let mut w = Wishlist::with_session(storage, FakeRemote::default(), Some(Session::new("t")));
        let report = w.mount().expect("leftover entries are synced");
        assert_eq!(report.pushed, vec![id("left")]);
        assert!(w.is_wishlisted(&id("left")));
        assert_eq!(stored_json(w.local().storage()), None);
    }

    #[test]
    fn logout_clears_state_without_repopulating_storage() {
        let mut w = Wishlist::with_session(
            MemoryStorage::new(),
            FakeRemote::with_stored(&["A"]),
            Some(Session::new("tok")),
        );
        w.mount();
        assert!(w.is_wishlisted(&id("A")));

        assert!(w.set_session(None).is_none());
        assert!(w.is_empty());
        assert_eq!(w.phase(), SessionPhase::Guest);
        assert_eq!(stored_json(w.local().storage()), None);

        // Back to guest mode: writes land in local storage again.
        w.toggle(&id("B"));
        assert_eq!(stored_json(w.local().storage()).as_deref(), Some(r#"["B"]"#));
    }

    #[test]
    fn authenticated_clear_leaves_remote_alone() {
        let mut w = Wishlist::with_session(
            MemoryStorage::new(),
            FakeRemote::with_stored(&["A"]),
            Some(Session::new("tok")),
        );
        w.mount();
        w.clear_wishlist();
        assert!(w.is_empty());
        assert_eq!(w.remote().stored(), vec!["A"]);
    }

    #[test]
    fn switching_sessions_refetches_without_sync() {
        let mut w = Wishlist::with_session(
            MemoryStorage::new(),
            FakeRemote::with_stored(&["A"]),
            Some(Session::new("one")),
        );
        assert!(w.set_session(Some(Session::new("two"))).is_none());
        assert_eq!(w.remote().calls(), vec![Call::List]);
        assert_eq!(w.session().map(|s| s.token()), Some("two"));
    }

    #[test]
    fn session_swap_drops_previous_account_entries_when_refetch_fails() {
        let mut w = Wishlist::with_session(
            MemoryStorage::new(),
            FakeRemote::with_stored(&["alice-item"]),
            Some(Session::new("alice")),
        );
        w.mount();
        assert!(w.is_wishlisted(&id("alice-item")));

        w.remote().fail.set(true);
        w.set_session(Some(Session::new("bob")));
        assert!(w.is_empty());
        assert_eq!(w.phase(), SessionPhase::Authenticated);

        // Nothing left in memory that a later toggle could delete from bob's account.
        w.toggle(&id("alice-item"));
        assert!(w.is_wishlisted(&id("alice-item")));
        assert!(!w.remote().calls().contains(&Call::Remove("alice-item".to_string())));
    }

    #[test]
    fn mount_time_merge_keeps_guest_ids_when_remote_is_down() {
        let storage = MemoryStorage::new();
        storage
            .set_item(WISHLIST_STORAGE_KEY, r#"["left"]"#)
            .expect("seed storage");
        let mut w = Wishlist::with_session(storage, FakeRemote::default(), Some(Session::new("t")));
        w.remote().fail.set(true);

        let report = w.mount().expect("leftover entries are synced");
        assert_eq!(report.failed, vec![id("left")]);
        assert_eq!(w.entries(), &[id("left")]);
        assert_eq!(stored_json(w.local().storage()), None);
    }
