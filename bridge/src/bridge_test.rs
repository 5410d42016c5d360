use super::*;
use crate::address::AddressFamily;
use crate::exit::HookRun;

fn temp_bridge() -> (tempfile::TempDir, Arc<DevBridge>) {
    let dir = tempfile::tempdir().expect("tempdir");
    let bridge = Arc::new(DevBridge::new(BridgeFile::in_dir(dir.path().join("dist"))));
    (dir, bridge)
}

fn loopback_v4() -> ListenAddress {
    ListenAddress::structured(AddressFamily::Ipv4, "127.0.0.1", 3000)
}

// =============================================================================
// STATE MACHINE
// =============================================================================

#[test]
fn new_bridge_is_idle() {
    let (_dir, bridge) = temp_bridge();
    assert_eq!(bridge.state(), BridgeState::Idle);
}

#[test]
fn arm_moves_to_armed() {
    let (_dir, bridge) = temp_bridge();
    let hooks = ExitHooks::new();
    let (_notifier, bound) = bridge.arm(&hooks);
    assert!(bound);
    assert_eq!(bridge.state(), BridgeState::Armed);
}

#[test]
fn listening_writes_url_and_moves_to_written() {
    let (_dir, bridge) = temp_bridge();
    let hooks = ExitHooks::new();
    let (notifier, _) = bridge.arm(&hooks);

    let url = notifier.listening(&loopback_v4()).expect("publish");

    assert_eq!(url.as_deref(), Some("http://127.0.0.1:3000"));
    assert_eq!(bridge.state(), BridgeState::Written);
    let raw = std::fs::read_to_string(bridge.file().path()).expect("read");
    assert_eq!(raw, "http://127.0.0.1:3000");
}

#[test]
fn ipv6_listening_writes_bracketed_url() {
    let (_dir, bridge) = temp_bridge();
    let (notifier, _) = bridge.arm(&ExitHooks::new());

    notifier
        .listening(&ListenAddress::structured(AddressFamily::Ipv6, "::1", 3000))
        .expect("publish");

    assert_eq!(bridge.file().read().expect("read").as_deref(), Some("http://[::1]:3000"));
}

#[test]
fn opaque_address_writes_nothing_and_does_not_fail() {
    let (_dir, bridge) = temp_bridge();
    let (notifier, _) = bridge.arm(&ExitHooks::new());

    let url = notifier.listening(&ListenAddress::opaque("/tmp/dev.sock")).expect("no-op");

    assert_eq!(url, None);
    assert!(!bridge.file().exists());
    assert_eq!(bridge.state(), BridgeState::Armed);
}

#[test]
fn cleaned_bridge_ignores_late_listen_event() {
    let (_dir, bridge) = temp_bridge();
    let (notifier, _) = bridge.arm(&ExitHooks::new());
    bridge.clean().expect("clean");

    let url = notifier.listening(&loopback_v4()).expect("no-op");

    assert_eq!(url, None);
    assert!(!bridge.file().exists());
    assert_eq!(bridge.state(), BridgeState::Cleaned);
}

// =============================================================================
// CLEANUP
// =============================================================================

#[test]
fn exit_hooks_remove_the_file() {
    let (_dir, bridge) = temp_bridge();
    let hooks = ExitHooks::new();
    let (notifier, _) = bridge.arm(&hooks);
    notifier.listening(&loopback_v4()).expect("publish");

    assert_eq!(hooks.run(), HookRun { ran: 1, failed: 0 });

    assert!(!bridge.file().exists());
    assert_eq!(bridge.state(), BridgeState::Cleaned);
}

#[test]
fn clean_twice_does_not_fail() {
    let (_dir, bridge) = temp_bridge();
    let (notifier, _) = bridge.arm(&ExitHooks::new());
    notifier.listening(&loopback_v4()).expect("publish");

    bridge.clean().expect("first clean");
    bridge.clean().expect("second clean");
    assert!(!bridge.file().exists());
}

#[test]
fn arming_twice_binds_exit_handlers_once() {
    let (_dir, bridge) = temp_bridge();
    let hooks = ExitHooks::new();

    let (_first, first_bound) = bridge.arm(&hooks);
    let (second, second_bound) = bridge.arm(&hooks);
    second.listening(&loopback_v4()).expect("publish");

    assert!(first_bound);
    assert!(!second_bound);
    assert_eq!(hooks.run(), HookRun { ran: 1, failed: 0 });
    assert!(!bridge.file().exists());
}

#[tokio::test]
async fn setup_twice_in_one_process_binds_once() {
    let (_dir, bridge) = temp_bridge();
    let hooks = Arc::new(ExitHooks::new());

    let _first = setup(&bridge, &hooks);
    let second = setup(&bridge, &hooks);
    second.listening(&loopback_v4()).expect("publish");

    assert!(hooks.is_bound());
    assert_eq!(hooks.run(), HookRun { ran: 1, failed: 0 });
    assert!(!bridge.file().exists());
}

#[cfg(unix)]
#[test]
fn failed_removal_fails_the_cleanup_pass() {
    let (_dir, bridge) = temp_bridge();
    let hooks = ExitHooks::new();
    let (notifier, _) = bridge.arm(&hooks);
    notifier.listening(&loopback_v4()).expect("publish");
    // A directory in place of the file cannot be removed with remove_file.
    std::fs::remove_file(bridge.file().path()).expect("remove");
    std::fs::create_dir(bridge.file().path()).expect("mkdir");

    let run = hooks.run();

    assert_eq!(run, HookRun { ran: 1, failed: 1 });
    assert_eq!(bridge.state(), BridgeState::Cleaned);
}
