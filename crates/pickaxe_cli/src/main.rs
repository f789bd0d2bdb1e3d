//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `pickaxe_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use pickaxe_core::{MemoService, MemoStore};

fn main() {
    println!("pickaxe_core version={}", pickaxe_core::core_version());

    // Probe the store lifecycle against a throwaway in-memory database; the
    // store stays owned here and the service borrows it.
    let store = MemoStore::in_memory();
    let service = MemoService::new(&store);
    match store.initialize().map_err(Into::into).and_then(|()| service.list_memos()) {
        Ok(memos) => println!(
            "pickaxe_core store ready={} memos={}",
            store.is_ready(),
            memos.len()
        ),
        Err(err) => eprintln!("pickaxe_core store error: {err}"),
    }
}
