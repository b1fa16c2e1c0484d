// SPDX-License-Identifier: AGPL-3.0-or-later
//! Fuzz target for path resolution and tree mutation

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use vsh_core::{ArchiveEntry, VirtualPath};
use vsh_vfs::Vfs;

#[derive(Arbitrary, Debug)]
enum Op {
    Cd(String),
    Ls(String),
    Mv(String, String),
    Tree(Option<String>),
}

#[derive(Arbitrary, Debug)]
struct Input {
    /// `(path, is_directory)` members of the synthetic archive
    entries: Vec<(String, bool)>,
    ops: Vec<Op>,
}

fuzz_target!(|input: Input| {
    let entries = input.entries.into_iter().map(|(path, is_dir)| {
        if is_dir {
            ArchiveEntry::directory(path)
        } else {
            ArchiveEntry::file(path, "x")
        }
    });
    let mut vfs = Vfs::from_entries(entries);

    for op in input.ops {
        match op {
            Op::Cd(path) => {
                let before = vfs.current_path().clone();
                if vfs.change_directory(&path).is_err() {
                    assert_eq!(vfs.current_path(), &before);
                }
            }
            Op::Ls(path) => {
                if let Ok(names) = vfs.list(&path) {
                    assert!(names.windows(2).all(|w| w[0] < w[1]));
                }
            }
            Op::Mv(src, dest) => {
                let _ = vfs.move_node(&src, &dest);
            }
            Op::Tree(path) => {
                if let Ok(view) = vfs.tree(path.as_deref()) {
                    let _ = view.to_string();
                }
            }
        }

        // the current directory is always stored normalized
        let cwd = vfs.current_path().to_path_string();
        assert_eq!(VirtualPath::new(&cwd), *vfs.current_path());
    }
});
