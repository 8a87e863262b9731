use std::path::{Path, PathBuf};
use std::vec;

use filters::{BucketName, CriteriaStore, MatchMode, Verdict, evaluate};
use logging::{debug_log, info_log};
use rustc_hash::FxHashSet;

use crate::config::{SortOrder, WalkerConfig};
use crate::entity::PathEntity;
use crate::entry::WalkEntry;
use crate::error::WalkError;

/// One pass over the tree, produced by [`PathIterator::iter`](crate::PathIterator::iter).
///
/// The pass borrows the builder, so criteria and configuration cannot change
/// while it runs. Pruning state lives here and is discarded with the pass.
pub struct Walk<'a, P: PathEntity> {
    store: &'a CriteriaStore<WalkEntry<P>>,
    config: &'a WalkerConfig<P>,
    root: Option<P>,
    stack: Vec<Frame<P>>,
    pending: Option<Descent<P>>,
    pruned: FxHashSet<PathBuf>,
    visited: FxHashSet<PathBuf>,
    buffer: Option<vec::IntoIter<WalkEntry<P>>>,
    yielded: usize,
    finished: bool,
}

struct Frame<P> {
    path: PathBuf,
    budget: i64,
    files: vec::IntoIter<WalkEntry<P>>,
    dirs: vec::IntoIter<WalkEntry<P>>,
}

struct Descent<P> {
    entry: WalkEntry<P>,
    budget: i64,
}

enum Pick<P> {
    File(WalkEntry<P>),
    Dir(WalkEntry<P>, i64),
    Exhausted,
}

impl<'a, P: PathEntity> Walk<'a, P> {
    pub(crate) fn new(
        root: P,
        store: &'a CriteriaStore<WalkEntry<P>>,
        config: &'a WalkerConfig<P>,
    ) -> Self {
        debug_log!(Walk, 1, "starting walk at {}", root.path().display());
        Self {
            store,
            config,
            root: Some(root),
            stack: Vec::new(),
            pending: None,
            pruned: FxHashSet::default(),
            visited: FxHashSet::default(),
            buffer: None,
            yielded: 0,
            finished: false,
        }
    }

    /// Prunes `path` for the rest of this pass.
    ///
    /// Nothing beneath `path` is visited afterwards, including a directory
    /// the pass is currently inside. Pruning a path the pass never reaches
    /// has no effect. Once a sorted or reversed pass has started streaming
    /// its buffer, pruning no longer changes its output. An empty path names
    /// nothing and is ignored.
    pub fn finish(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return;
        }
        if let Some(index) = self
            .stack
            .iter()
            .position(|frame| frame.path.starts_with(path))
        {
            debug_log!(
                Prune,
                2,
                "abandoning {} open directories under {}",
                self.stack.len() - index,
                path.display()
            );
            self.stack.truncate(index);
        }
        debug_log!(Prune, 1, "pruned {}", path.display());
        self.pruned.insert(path.to_path_buf());
    }

    fn is_pruned(&self, path: &Path) -> bool {
        !self.pruned.is_empty() && path.ancestors().any(|ancestor| self.pruned.contains(ancestor))
    }

    fn enter(&mut self, entity: &P, prefix: &str, depth: usize, budget: i64) -> Result<(), WalkError> {
        if budget == 0 {
            return Ok(());
        }

        if let Some(canonical) = entity.canonical()
            && !self.visited.insert(canonical)
        {
            debug_log!(
                Walk,
                2,
                "skipping already visited directory {}",
                entity.path().display()
            );
            return Ok(());
        }

        let mut children = match entity.enumerate_children() {
            Ok(children) => children,
            Err(error) if self.config.ignore_errors => {
                info_log!(
                    Skip,
                    1,
                    "skipping unreadable directory {}: {}",
                    entity.path().display(),
                    error
                );
                return Ok(());
            }
            Err(error) => return Err(WalkError::read_dir(entity.path().to_path_buf(), error)),
        };
        children.sort_by(|left, right| left.name.cmp(&right.name));
        debug_log!(
            Walk,
            3,
            "found {} entries in {}",
            children.len(),
            entity.path().display()
        );

        let mut files = Vec::new();
        let mut dirs = Vec::new();
        for child in &children {
            let name = child.name.to_string_lossy();
            let relative = if prefix.is_empty() {
                name.into_owned()
            } else {
                format!("{prefix}/{name}")
            };
            let entry = WalkEntry::new(entity.join(child), relative, depth + 1);
            if child.is_dir {
                dirs.push(entry);
            } else {
                files.push(entry);
            }
        }

        self.stack.push(Frame {
            path: entity.path().to_path_buf(),
            budget,
            files: files.into_iter(),
            dirs: dirs.into_iter(),
        });
        Ok(())
    }

    fn check(
        &self,
        bucket: BucketName,
        mode: MatchMode,
        entry: &WalkEntry<P>,
    ) -> Result<Verdict, WalkError> {
        evaluate(self.store.bucket(bucket), mode, entry)
            .map_err(|source| WalkError::evaluate(entry.path().to_path_buf(), source))
    }

    fn accept_file(&self, entry: &WalkEntry<P>) -> Result<bool, WalkError> {
        if !self.config.yields_files() {
            return Ok(false);
        }
        if !self.check(BucketName::Files, MatchMode::Match, entry)?.passed {
            return Ok(false);
        }
        Ok(self.check(BucketName::Paths, MatchMode::Match, entry)?.passed)
    }

    fn visit_dir(
        &mut self,
        entry: WalkEntry<P>,
        parent_budget: i64,
    ) -> Result<Option<WalkEntry<P>>, WalkError> {
        let dirs = self.check(BucketName::Dirs, MatchMode::Match, &entry)?;
        let paths = if dirs.passed {
            self.check(BucketName::Paths, MatchMode::Match, &entry)?
        } else {
            Verdict::fail()
        };
        let matched = dirs.passed && paths.passed;
        let match_finish = matched && (dirs.finish || paths.finish);

        let traversal = self.check(BucketName::Dirs, MatchMode::Traversal, &entry)?;
        if !traversal.passed || traversal.finish || match_finish {
            debug_log!(Prune, 1, "not descending into {}", entry.relative_path());
        } else {
            let budget = traversal.depth.unwrap_or(if parent_budget < 0 {
                -1
            } else {
                parent_budget - 1
            });
            if budget == 0 {
                debug_log!(Walk, 3, "depth exhausted at {}", entry.relative_path());
            } else {
                self.pending = Some(Descent {
                    entry: entry.clone(),
                    budget,
                });
            }
        }

        Ok((matched && self.config.yields_dirs()).then_some(entry))
    }

    fn descend(&mut self, descent: Descent<P>) -> Result<(), WalkError> {
        let Descent { entry, budget } = descent;
        if self.is_pruned(entry.path()) {
            debug_log!(Prune, 2, "skipping pruned {}", entry.relative_path());
            return Ok(());
        }
        self.enter(entry.entity(), entry.relative_path(), entry.depth(), budget)
    }

    fn step(&mut self) -> Option<Result<WalkEntry<P>, WalkError>> {
        if let Some(root) = self.root.take()
            && let Err(error) = self.enter(&root, "", 0, self.config.depth)
        {
            return Some(Err(error));
        }

        loop {
            if let Some(descent) = self.pending.take()
                && let Err(error) = self.descend(descent)
            {
                return Some(Err(error));
            }

            let pick = match self.stack.last_mut() {
                None => return None,
                Some(frame) => {
                    if let Some(entry) = frame.files.next() {
                        Pick::File(entry)
                    } else if let Some(entry) = frame.dirs.next() {
                        Pick::Dir(entry, frame.budget)
                    } else {
                        Pick::Exhausted
                    }
                }
            };

            match pick {
                Pick::File(entry) => match self.accept_file(&entry) {
                    Ok(true) => return Some(Ok(entry)),
                    Ok(false) => {}
                    Err(error) => return Some(Err(error)),
                },
                Pick::Dir(entry, budget) => match self.visit_dir(entry, budget) {
                    Ok(Some(entry)) => return Some(Ok(entry)),
                    Ok(None) => {}
                    Err(error) => return Some(Err(error)),
                },
                Pick::Exhausted => {
                    self.stack.pop();
                }
            }
        }
    }

    fn materialize(&mut self) -> Result<(), WalkError> {
        let mut entries = Vec::new();
        while let Some(entry) = self.step() {
            entries.push(entry?);
        }

        match self.config.sort() {
            Some(SortOrder::Natural) => entries.sort_by(|left, right| left.path().cmp(right.path())),
            Some(SortOrder::By(comparator)) => entries.sort_by(|left, right| comparator(left, right)),
            None => {}
        }
        if self.config.reverse {
            entries.reverse();
        }
        debug_log!(
            Sort,
            1,
            "buffered {} entries (sort: {:?}, reverse: {})",
            entries.len(),
            self.config.sort(),
            self.config.reverse
        );

        self.buffer = Some(entries.into_iter());
        Ok(())
    }

    fn pull(&mut self) -> Option<Result<WalkEntry<P>, WalkError>> {
        if !self.config.buffers() {
            return self.step();
        }
        if self.buffer.is_none()
            && let Err(error) = self.materialize()
        {
            return Some(Err(error));
        }
        self.buffer.as_mut()?.next().map(Ok)
    }
}

impl<P: PathEntity> Iterator for Walk<'_, P> {
    type Item = Result<WalkEntry<P>, WalkError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.pull() {
            Some(Ok(entry)) => {
                self.yielded += 1;
                debug_log!(Walk, 4, "yield {}", entry.relative_path());
                Some(Ok(entry))
            }
            Some(Err(error)) => {
                self.finished = true;
                debug_log!(Walk, 1, "walk stopped: {}", error);
                Some(Err(error))
            }
            None => {
                self.finished = true;
                info_log!(Walk, 1, "walk produced {} entries", self.yielded);
                None
            }
        }
    }
}
