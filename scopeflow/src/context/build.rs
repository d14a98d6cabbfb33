//! The build context: the single source of truth for which group is open.

use super::registry::RecursionKey;
use super::{GroupRegistry, Scope};
use crate::config::BuildConfig;
use crate::core::{GroupId, GroupKind, Task, TaskId};
use crate::errors::{Result, ScopeError};
use crate::groups::{remove_task_recursive, GroupNode, GroupPayload, GroupVariant};
use crate::observability::trace_tree;
use crate::tree::GroupTree;
use crate::utils::{group_name, sanitize_name, unique_name, LoopCodeGenerator};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info, trace};

/// State of one in-progress build.
#[derive(Debug)]
struct BuildState {
    pipeline_name: String,
    root: GroupId,
    groups: Vec<GroupNode>,
    tasks: Vec<Task>,
    stack: Vec<GroupId>,
    group_counter: u64,
    /// Most recent freshly named group per recursion key.
    recursion_index: HashMap<RecursionKey, GroupId>,
    task_names: HashSet<String>,
    loop_codes: LoopCodeGenerator,
}

/// Tracks the tree of groups while pipeline-definition code runs.
///
/// A context is idle until [`begin`](Self::begin) and idle again after
/// [`finish`](Self::finish); at most one build is in progress per context.
/// Independent builds, including concurrent ones, use separate contexts.
///
/// ```rust
/// use scopeflow::prelude::*;
///
/// let mut ctx = BuildContext::new();
/// ctx.begin("demo").unwrap();
/// {
///     let mut limit = ctx.open(Parallelism::new(Some(2)).unwrap()).unwrap();
///     limit.add_task(Task::new("work")).unwrap();
/// }
/// let tree = ctx.finish().unwrap();
/// assert_eq!(tree.children(tree.root()).len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct BuildContext {
    config: BuildConfig,
    state: Option<BuildState>,
}

impl BuildContext {
    /// Creates an idle context with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an idle context with the given configuration.
    #[must_use]
    pub fn with_config(config: BuildConfig) -> Self {
        Self {
            config,
            state: None,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Returns true while a build is in progress.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state.is_some()
    }

    /// Returns the name of the pipeline being built.
    #[must_use]
    pub fn pipeline_name(&self) -> Option<&str> {
        self.state.as_ref().map(|s| s.pipeline_name.as_str())
    }

    /// Starts a build, creating and opening the root pipeline group.
    ///
    /// # Errors
    ///
    /// Returns `BuildInProgress` if this context is already building.
    pub fn begin(&mut self, pipeline_name: impl Into<String>) -> Result<GroupId> {
        if let Some(state) = &self.state {
            return Err(ScopeError::BuildInProgress {
                pipeline: state.pipeline_name.clone(),
            });
        }

        let pipeline_name = pipeline_name.into();
        self.state = Some(BuildState {
            pipeline_name: pipeline_name.clone(),
            root: GroupId(0),
            groups: Vec::new(),
            tasks: Vec::new(),
            stack: Vec::new(),
            group_counter: 0,
            recursion_index: HashMap::new(),
            task_names: HashSet::new(),
            loop_codes: LoopCodeGenerator::new(
                self.config.effective_loop_code_chars(),
                self.config.loop_code_seed,
            ),
        });

        let mut root = GroupNode::new(GroupPayload::Pipeline, Some(pipeline_name.clone()));
        root.assign_name(pipeline_name.clone());
        let root = self.push_group(root)?;
        info!(pipeline = %pipeline_name, "Started pipeline build");
        Ok(root)
    }

    /// Ends the build and hands over the finished tree.
    ///
    /// # Errors
    ///
    /// Returns `NoActiveContext` when idle and `ScopesStillOpen` if any group
    /// other than the root is still open; the build stays active then.
    pub fn finish(&mut self) -> Result<GroupTree> {
        let Some(state) = self.state.take() else {
            return Err(ScopeError::NoActiveContext);
        };
        if state.stack.len() > 1 {
            let open = state.stack[1..]
                .iter()
                .filter_map(|id| state.groups.get(id.0))
                .map(|g| g.name().to_string())
                .collect();
            self.state = Some(state);
            return Err(ScopeError::ScopesStillOpen { open });
        }

        info!(
            pipeline = %state.pipeline_name,
            groups = state.groups.len(),
            tasks = state.tasks.len(),
            "Finished pipeline build"
        );
        let tree = GroupTree::new(state.pipeline_name, state.root, state.groups, state.tasks);
        trace_tree(&tree);
        Ok(tree)
    }

    /// Returns the root pipeline group.
    pub fn root(&self) -> Result<GroupId> {
        Ok(self.state()?.root)
    }

    /// Returns the currently open group.
    ///
    /// # Errors
    ///
    /// Returns `NoActiveContext` if no build is in progress.
    pub fn current_group(&self) -> Result<GroupId> {
        self.state()?
            .stack
            .last()
            .copied()
            .ok_or(ScopeError::StackUnderflow)
    }

    /// Returns the number of open groups, root included. Zero when idle.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.state.as_ref().map_or(0, |s| s.stack.len())
    }

    /// Opens a group as a child of the current group and makes it current.
    ///
    /// A named group whose kind and name match a group that is still open is
    /// a recursive re-entry: it reuses that group's name and points back at
    /// it. Loops are never re-entries. Any other group gets a fresh
    /// `<kind>-[<name>-]<id>` name.
    ///
    /// # Errors
    ///
    /// Returns `NoActiveContext` when idle and `NestingTooDeep` when the
    /// configured depth limit is reached.
    pub fn open<V: GroupVariant>(&mut self, variant: V) -> Result<Scope<'_, V::Handle>> {
        let depth = self.state()?.stack.len();
        if let Some(limit) = self.config.max_depth {
            if depth >= limit {
                return Err(ScopeError::NestingTooDeep { limit });
            }
        }

        let (mut node, handle) = variant.into_parts();
        let kind = node.kind();
        let key = node
            .given_name()
            .filter(|_| kind.can_recurse())
            .map(|base| RecursionKey::new(kind, base));
        let matched = match &key {
            Some(key) => self.find_open(key)?,
            None => None,
        };

        let fresh_key = if let Some(prior) = matched {
            let name = self.group(prior)?.name().to_string();
            debug!(group = %name, kind = %kind, recursive_ref = %prior, "Recursive re-entry");
            node.assign_name(name);
            node.set_recursive_ref(prior);
            None
        } else {
            let id = self.next_group_id()?;
            let name = group_name(kind, node.given_name(), id);
            node.assign_name(name);
            key
        };

        let id = self.push_group(node)?;
        if let Some(key) = fresh_key {
            self.state_mut()?.recursion_index.insert(key, id);
        }
        Ok(Scope::new(self, id, handle))
    }

    /// Looks up an open group of `kind` whose base name is `base_name`.
    ///
    /// # Errors
    ///
    /// Returns `NoActiveContext` if no build is in progress.
    pub fn find_matching(&self, kind: GroupKind, base_name: &str) -> Result<Option<GroupId>> {
        self.find_open(&RecursionKey::new(kind, base_name))
    }

    fn find_open(&self, key: &RecursionKey) -> Result<Option<GroupId>> {
        let state = self.state()?;
        Ok(state
            .recursion_index
            .get(key)
            .copied()
            .filter(|id| state.stack.contains(id)))
    }

    /// Adds a task to the current group.
    ///
    /// The name is sanitized (unless disabled in the configuration) and
    /// suffixed with `-2`, `-3`, ... if already taken in this build.
    ///
    /// # Errors
    ///
    /// Returns `NoActiveContext` if no build is in progress.
    pub fn add_task(&mut self, mut task: Task) -> Result<TaskId> {
        let sanitize = self.config.sanitize_task_names;
        let parent = self.current_group()?;
        let state = self.state_mut()?;

        let base = if sanitize {
            sanitize_name(&task.name)
        } else {
            task.name.clone()
        };
        let base = if base.is_empty() { "task".to_string() } else { base };
        task.name = unique_name(&base, &state.task_names);
        state.task_names.insert(task.name.clone());

        let id = TaskId(state.tasks.len());
        trace!(task = %task.name, group = %parent, "Added task");
        state.tasks.push(task);
        if let Some(group) = state.groups.get_mut(parent.0) {
            group.push_task(id);
        }
        Ok(id)
    }

    /// Makes `task` depend on `upstream`.
    ///
    /// This and [`add_task`](Self::add_task) are the only ways to change a
    /// task, so names stay unique once assigned:
    ///
    /// ```compile_fail
    /// use scopeflow::prelude::*;
    ///
    /// let mut ctx = BuildContext::new();
    /// ctx.begin("p").unwrap();
    /// let a = ctx.add_task(Task::new("a")).unwrap();
    /// ctx.task_mut(a).unwrap().name = "b".to_string();
    /// ```
    pub fn task_after(&mut self, task: TaskId, upstream: TaskId) -> Result<()> {
        let upstream = self.task(upstream)?.name.clone();
        self.task_mut(task)?.add_dependency(upstream);
        Ok(())
    }

    /// Returns a task.
    pub fn task(&self, id: TaskId) -> Result<&Task> {
        self.state()?
            .tasks
            .get(id.0)
            .ok_or(ScopeError::UnknownTask(id))
    }

    pub(crate) fn task_mut(&mut self, id: TaskId) -> Result<&mut Task> {
        self.state_mut()?
            .tasks
            .get_mut(id.0)
            .ok_or(ScopeError::UnknownTask(id))
    }

    /// Returns a group.
    pub fn group(&self, id: GroupId) -> Result<&GroupNode> {
        self.state()?
            .groups
            .get(id.0)
            .ok_or(ScopeError::UnknownGroup(id))
    }

    /// Returns a group for editing, e.g. `ctx.group_mut(id)?.after(task)`.
    pub fn group_mut(&mut self, id: GroupId) -> Result<&mut GroupNode> {
        self.state_mut()?
            .groups
            .get_mut(id.0)
            .ok_or(ScopeError::UnknownGroup(id))
    }

    /// Removes `task` from `group` and all groups beneath it.
    pub fn remove_task_recursive(&mut self, group: GroupId, task: TaskId) -> Result<bool> {
        let state = self.state_mut()?;
        if group.0 >= state.groups.len() {
            return Err(ScopeError::UnknownGroup(group));
        }
        Ok(remove_task_recursive(&mut state.groups, group, task))
    }

    /// Returns a fresh loop code of the configured width.
    pub fn next_loop_code(&mut self) -> Result<String> {
        Ok(self.state_mut()?.loop_codes.next_code())
    }

    fn state(&self) -> Result<&BuildState> {
        self.state.as_ref().ok_or(ScopeError::NoActiveContext)
    }

    fn state_mut(&mut self) -> Result<&mut BuildState> {
        self.state.as_mut().ok_or(ScopeError::NoActiveContext)
    }
}

impl GroupRegistry for BuildContext {
    fn push_group(&mut self, node: GroupNode) -> Result<GroupId> {
        let state = self.state_mut()?;
        let id = GroupId(state.groups.len());
        let parent = state.stack.last().copied();
        if let Some(parent) = parent.and_then(|p| state.groups.get_mut(p.0)) {
            parent.push_child(id);
        }
        debug!(
            group = %node.name(),
            kind = %node.kind(),
            depth = state.stack.len(),
            "Opened group"
        );
        state.groups.push(node);
        state.stack.push(id);
        Ok(id)
    }

    fn pop_group(&mut self) -> Result<GroupId> {
        self.state_mut()?
            .stack
            .pop()
            .ok_or(ScopeError::StackUnderflow)
    }

    fn next_group_id(&mut self) -> Result<u64> {
        let state = self.state_mut()?;
        state.group_counter += 1;
        Ok(state.group_counter)
    }

    fn all_groups(&self) -> Result<&[GroupNode]> {
        Ok(&self.state()?.groups)
    }

    fn remove_task_from_groups(&mut self, task: TaskId) -> Result<bool> {
        let state = self.state_mut()?;
        let root = state.root;
        Ok(remove_task_recursive(&mut state.groups, root, task))
    }
}
