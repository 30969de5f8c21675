use super::*;
use crate::kernel::services::adapters::probe::CountingProbe;
use std::sync::Arc;
use tempfile::tempdir;

const LONELY_MARKER: &str = "zroot-test-marker-5f1c9e";

fn counting_cache(markers: &[&str]) -> RootCache<CountingProbe> {
    RootCache::with_probe(CountingProbe::default(), MarkerSet::new(markers.iter().copied()))
}

#[test]
fn repeated_lookups_do_not_touch_the_filesystem() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("proj").join("src");
    std::fs::create_dir_all(&src).unwrap();
    std::fs::create_dir(dir.path().join("proj").join(".git")).unwrap();

    let mut cache = counting_cache(&[".git"]);
    let first = cache.get_root(&src);
    let calls = cache.probe().total_calls();
    assert!(calls > 0);

    for _ in 0..5 {
        assert_eq!(cache.get_root(&src), first);
    }
    assert_eq!(cache.probe().total_calls(), calls);
    assert_eq!(first.root(), Some(dir.path().join("proj").as_path()));
}

#[test]
fn files_in_one_directory_share_a_single_resolution() {
    let dir = tempdir().unwrap();
    let proj = dir.path().join("proj");
    std::fs::create_dir_all(&proj).unwrap();
    std::fs::write(proj.join("pyproject.toml"), "").unwrap();

    let mut cache = counting_cache(&["pyproject.toml"]);
    let a = cache.get_root_for_file(&proj.join("a.py"));
    let calls = cache.probe().total_calls();
    let b = cache.get_root_for_file(&proj.join("b.py"));

    assert_eq!(a, b);
    assert_eq!(cache.probe().total_calls(), calls);
    assert_eq!(cache.len(), 1);
    assert!(cache.cached(&proj).is_some());
}

#[test]
fn negative_results_are_cached() {
    let dir = tempdir().unwrap();
    let mut cache = counting_cache(&[LONELY_MARKER]);

    assert_eq!(cache.get_root(dir.path()), ResolvedRoot::NotFound);
    let calls = cache.probe().total_calls();
    assert_eq!(cache.get_root(dir.path()), ResolvedRoot::NotFound);
    assert_eq!(cache.probe().total_calls(), calls);
    assert_eq!(cache.cached(dir.path()), Some(&ResolvedRoot::NotFound));
}

#[test]
fn cached_answer_stays_stale_until_invalidated() {
    let dir = tempdir().unwrap();
    let proj = dir.path().join("proj");
    std::fs::create_dir_all(&proj).unwrap();

    let mut cache = counting_cache(&[LONELY_MARKER]);
    assert_eq!(cache.get_root(&proj), ResolvedRoot::NotFound);

    std::fs::write(proj.join(LONELY_MARKER), "").unwrap();
    assert_eq!(cache.get_root(&proj), ResolvedRoot::NotFound);

    cache.invalidate();
    assert!(cache.is_empty());
    let calls = cache.probe().total_calls();
    let resolved = cache.get_root(&proj);
    assert!(cache.probe().total_calls() > calls);
    assert_eq!(resolved.root(), Some(proj.as_path()));
}

#[test]
fn stats_count_hits_and_misses_and_reset_on_invalidate() {
    let dir = tempdir().unwrap();
    let mut cache = counting_cache(&[LONELY_MARKER]);

    cache.get_root(dir.path());
    cache.get_root(dir.path());
    cache.get_root(dir.path());
    assert_eq!(
        cache.stats(),
        CacheStats {
            entries: 1,
            hits: 2,
            misses: 1
        }
    );

    cache.invalidate();
    assert_eq!(cache.stats(), CacheStats::default());
}

#[test]
fn distinct_directories_get_distinct_entries() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a");
    let b = dir.path().join("b");
    std::fs::create_dir_all(&a).unwrap();
    std::fs::create_dir_all(&b).unwrap();
    std::fs::write(a.join(LONELY_MARKER), "").unwrap();

    let mut cache = counting_cache(&[LONELY_MARKER]);
    assert_eq!(cache.get_root(&a).root(), Some(a.as_path()));
    assert_eq!(cache.get_root(&b), ResolvedRoot::NotFound);
    assert_eq!(cache.len(), 2);
}

#[test]
fn shared_cache_resolves_once_across_threads() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join(LONELY_MARKER), "").unwrap();

    let shared = Arc::new(SharedRootCache::new(counting_cache(&[LONELY_MARKER])));
    let start = dir.path().to_path_buf();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let shared = Arc::clone(&shared);
            let start = start.clone();
            std::thread::spawn(move || shared.get_root(&start))
        })
        .collect();

    for handle in handles {
        let resolved = handle.join().unwrap();
        assert_eq!(resolved.root(), Some(start.as_path()));
    }

    let stats = shared.stats();
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.hits, 7);
    assert_eq!(shared.with_cache(|cache| cache.probe().exists_calls()), 1);

    shared.invalidate();
    assert_eq!(shared.stats().entries, 0);
}

#[test]
fn equivalent_spellings_share_one_entry() {
    let dir = tempdir().unwrap();
    let proj = dir.path().join("proj");
    std::fs::create_dir_all(proj.join("src")).unwrap();
    std::fs::write(proj.join(LONELY_MARKER), "").unwrap();

    let mut cache = counting_cache(&[LONELY_MARKER]);
    let first = cache.get_root(&proj);
    let calls = cache.probe().total_calls();

    assert_eq!(cache.get_root(&proj.join(".")), first);
    assert_eq!(cache.get_root(&proj.join("src").join("..")), first);
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.probe().total_calls(), calls);
    assert!(cache.cached(&proj.join("./")).is_some());
}
