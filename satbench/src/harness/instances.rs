use std::path::Path;
use std::path::PathBuf;

/// Expand `paths` into the list of instances to benchmark.
///
/// Directories are searched recursively for files with the `cnf` extension. Other paths are
/// taken as given, whatever their extension. The result is sorted and free of duplicates.
pub fn collect_instances(paths: &[PathBuf]) -> std::io::Result<Vec<PathBuf>> {
    let mut instances = Vec::new();

    for path in paths {
        if path.is_dir() {
            collect_cnf_files(path, &mut instances)?;
        } else {
            instances.push(path.clone());
        }
    }

    instances.sort();
    instances.dedup();

    Ok(instances)
}

fn collect_cnf_files(dir: &Path, instances: &mut Vec<PathBuf>) -> std::io::Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();

        if path.is_dir() {
            collect_cnf_files(&path, instances)?;
        } else if path.extension().is_some_and(|ext| ext == "cnf") {
            instances.push(path);
        }
    }

    Ok(())
}
