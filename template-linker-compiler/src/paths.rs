//! Path helpers for asset URL rewriting

use std::path::{Component, Path};

/// Base path for asset URLs of `filename` when served by the live server:
/// `base` joined with the `/`-separated location of the file's directory
/// relative to `root`.
pub fn asset_base(base: &str, root: &Path, filename: &Path) -> String {
    let dir = filename.parent().unwrap_or_else(|| Path::new(""));
    let relative = relative_slash_path(root, dir);

    let mut out = base.trim_end_matches('/').to_string();
    out.push('/');
    out.push_str(&relative);
    out
}

/// Lexical relative path from `from` to `to`, joined with `/`
pub fn relative_slash_path(from: &Path, to: &Path) -> String {
    let from = normalize(from);
    let to = normalize(to);

    let common = from
        .iter()
        .zip(&to)
        .take_while(|(a, b)| a == b)
        .count();

    let ups = std::iter::repeat("..".to_string()).take(from.len() - common);
    let downs = to[common..]
        .iter()
        .map(|c| c.as_os_str().to_string_lossy().into_owned());

    ups.chain(downs).collect::<Vec<_>>().join("/")
}

fn normalize(path: &Path) -> Vec<Component<'_>> {
    let mut parts: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last().copied() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                // `..` at the root stays at the root
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            _ => parts.push(component),
        }
    }
    parts
}
