//! Resolve a path spec through the `TYPE_FAKE` backend, walk its tree, and
//! read a file's content back out. Run with:
//!
//! ```text
//! cargo run --example basic_usage
//! ```

use vfscore::credentials::KeyChain;
use vfscore::mount::MountPointManager;
use vfscore::registry::TypeRegistry;
use vfscore::{resolver, PathSpec, VfsExt};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let registry = TypeRegistry::global();
    let key_chain = KeyChain::new();
    let mounts = MountPointManager::new();

    let root_spec = PathSpec::fake("/");
    let root = resolver::open_file_entry(&root_spec, registry, &key_chain, &mounts, None)
        .expect("resolver call should not fail")
        .expect("root always exists");

    println!("root is_directory={} children={}", root.is_directory(), root.number_of_sub_file_entries());

    for entry in root.sub_file_entries().collect_all().expect("fake backend enumerates eagerly") {
        println!("  {} (file={}, dir={})", entry.name(), entry.is_file(), entry.is_directory());
    }

    // Register a mount point and resolve through it instead of a direct spec.
    mounts.register_mount("demo-mount", PathSpec::fake("/a_file"));
    let mounted_spec = PathSpec::mount("demo-mount");
    let mounted_entry = resolver::open_file_entry(&mounted_spec, registry, &key_chain, &mounts, None)
        .expect("resolver call should not fail")
        .expect("the mount target exists");
    let content = mounted_entry.read_to_end().expect("a_file has a default stream");
    println!("via mount point: {}", String::from_utf8_lossy(&content));
}
