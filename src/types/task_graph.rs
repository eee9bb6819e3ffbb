// Copyright (c) 2025 ADBC Drivers Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Task dependency graph for jobs and runs.
//!
//! On the wire a job's tasks are a flat list and each task names its
//! upstream tasks by key:
//!
//! ```text
//! "tasks": [
//!   {"task_key": "A", ...},
//!   {"task_key": "B", ...},
//!   {"task_key": "C", "depends_on": [{"task_key": "A"}, {"task_key": "B"}], ...}
//! ]
//! ```
//!
//! [`TaskSet`] owns the tasks and, once linked, an adjacency list of indices
//! into its own storage, so dependency lookups return references to the
//! sibling tasks themselves. Decoding a `TaskSet` is "decode, then link":
//! the list is decoded structurally, then [`TaskSet::link`] resolves every
//! reference. Encoding writes the tasks back unchanged, so each dependency is
//! emitted as its key only.
//!
//! Linking rejects duplicate keys and references to unknown keys. Acyclicity
//! is a server-side concern and is only checked by
//! [`TaskSet::execution_order`].

use crate::error::{Error, Result};
use crate::types::variant::de_error;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{HashMap, HashSet, VecDeque};
use tracing::debug;

/// Name-only reference to a sibling task, as it appears in `depends_on`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskDependency {
    pub task_key: String,
}

impl TaskDependency {
    pub fn new(task_key: impl Into<String>) -> Self {
        Self {
            task_key: task_key.into(),
        }
    }
}

impl From<&str> for TaskDependency {
    fn from(task_key: &str) -> Self {
        Self::new(task_key)
    }
}

/// A node of a task graph: anything with a key and by-key dependencies.
pub trait GraphTask {
    fn task_key(&self) -> &str;
    fn depends_on(&self) -> &[TaskDependency];
}

/// Ordered task collection with resolved dependency links.
#[derive(Debug, Clone)]
pub struct TaskSet<T> {
    tasks: Vec<T>,
    index: HashMap<String, usize>,
    upstream: Vec<Vec<usize>>,
    downstream: Vec<Vec<usize>>,
}

impl<T> Default for TaskSet<T> {
    fn default() -> Self {
        Self {
            tasks: Vec::new(),
            index: HashMap::new(),
            upstream: Vec::new(),
            downstream: Vec::new(),
        }
    }
}

impl<T: PartialEq> PartialEq for TaskSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.tasks == other.tasks
    }
}

impl<T> TaskSet<T> {
    pub fn tasks(&self) -> &[T] {
        &self.tasks
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.tasks.iter()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Gives the tasks back, dropping the links.
    pub fn into_tasks(self) -> Vec<T> {
        self.tasks
    }

    pub fn get(&self, task_key: &str) -> Option<&T> {
        self.index.get(task_key).map(|&i| &self.tasks[i])
    }

    /// Upstream tasks of `task_key`, in `depends_on` order.
    pub fn dependencies_of(&self, task_key: &str) -> Option<Vec<&T>> {
        let position = *self.index.get(task_key)?;
        Some(
            self.upstream[position]
                .iter()
                .map(|&i| &self.tasks[i])
                .collect(),
        )
    }

    /// Tasks that list `task_key` in their `depends_on`, in collection order.
    pub fn dependents_of(&self, task_key: &str) -> Option<Vec<&T>> {
        let position = *self.index.get(task_key)?;
        Some(
            self.downstream[position]
                .iter()
                .map(|&i| &self.tasks[i])
                .collect(),
        )
    }

    /// Tasks with no dependencies.
    pub fn roots(&self) -> Vec<&T> {
        self.upstream
            .iter()
            .enumerate()
            .filter(|(_, deps)| deps.is_empty())
            .map(|(i, _)| &self.tasks[i])
            .collect()
    }
}

impl<T: GraphTask> TaskSet<T> {
    /// Resolves every dependency reference in `tasks`.
    ///
    /// Fails with [`Error::DuplicateTaskKey`] if two tasks share a key and with
    /// [`Error::UnresolvedTaskDependency`] if a task names a key that no
    /// sibling carries.
    pub fn link(tasks: Vec<T>) -> Result<Self> {
        let mut index = HashMap::with_capacity(tasks.len());
        for (position, task) in tasks.iter().enumerate() {
            if index.insert(task.task_key().to_string(), position).is_some() {
                return Err(Error::DuplicateTaskKey(task.task_key().to_string()));
            }
        }

        let mut upstream = Vec::with_capacity(tasks.len());
        let mut downstream = vec![Vec::new(); tasks.len()];
        for (position, task) in tasks.iter().enumerate() {
            let mut resolved = Vec::with_capacity(task.depends_on().len());
            for dependency in task.depends_on() {
                let target = *index.get(&dependency.task_key).ok_or_else(|| {
                    Error::UnresolvedTaskDependency {
                        task: task.task_key().to_string(),
                        dependency: dependency.task_key.clone(),
                    }
                })?;
                resolved.push(target);
                downstream[target].push(position);
            }
            upstream.push(resolved);
        }

        debug!("Linked {} tasks", tasks.len());

        Ok(Self {
            tasks,
            index,
            upstream,
            downstream,
        })
    }

    /// Appends a task. Its dependencies must already be present (or be the
    /// task itself); on error the set is left unchanged.
    pub fn push(&mut self, task: T) -> Result<()> {
        if self.index.contains_key(task.task_key()) {
            return Err(Error::DuplicateTaskKey(task.task_key().to_string()));
        }

        let position = self.tasks.len();
        let mut resolved = Vec::with_capacity(task.depends_on().len());
        for dependency in task.depends_on() {
            let target = if dependency.task_key == task.task_key() {
                position
            } else {
                *self.index.get(&dependency.task_key).ok_or_else(|| {
                    Error::UnresolvedTaskDependency {
                        task: task.task_key().to_string(),
                        dependency: dependency.task_key.clone(),
                    }
                })?
            };
            resolved.push(target);
        }

        self.downstream.push(Vec::new());
        for &target in &resolved {
            self.downstream[target].push(position);
        }
        self.upstream.push(resolved);
        self.index.insert(task.task_key().to_string(), position);
        self.tasks.push(task);
        Ok(())
    }

    /// Tasks ordered so that every task follows all of its dependencies.
    ///
    /// Ties keep collection order. Fails with [`Error::TaskCycle`] naming the
    /// keys along one cycle if the graph is not acyclic.
    pub fn execution_order(&self) -> Result<Vec<&T>> {
        let mut pending: Vec<usize> = self.upstream.iter().map(Vec::len).collect();
        let mut ready: VecDeque<usize> = (0..self.tasks.len())
            .filter(|&i| pending[i] == 0)
            .collect();
        let mut order = Vec::with_capacity(self.tasks.len());

        while let Some(position) = ready.pop_front() {
            order.push(position);
            for &next in &self.downstream[position] {
                pending[next] -= 1;
                if pending[next] == 0 {
                    ready.push_back(next);
                }
            }
        }

        if order.len() < self.tasks.len() {
            return Err(Error::TaskCycle(self.find_cycle(&pending)));
        }

        Ok(order.into_iter().map(|i| &self.tasks[i]).collect())
    }

    // Every task left with pending > 0 has an unfinished upstream task, so
    // walking upstream edges from one of them must revisit a task.
    fn find_cycle(&self, pending: &[usize]) -> Vec<String> {
        let Some(start) = pending.iter().position(|&p| p > 0) else {
            return Vec::new();
        };

        let mut path = vec![start];
        let mut seen = HashSet::from([start]);
        let mut current = start;
        loop {
            let Some(&next) = self.upstream[current].iter().find(|&&i| pending[i] > 0) else {
                break;
            };
            if !seen.insert(next) {
                // The walk follows upstream edges; reverse it so the keys
                // read in run order, then close the loop.
                let begin = path.iter().position(|&i| i == next).unwrap_or(0);
                let mut cycle: Vec<String> = path[begin..]
                    .iter()
                    .rev()
                    .map(|&i| self.tasks[i].task_key().to_string())
                    .collect();
                if let Some(first) = cycle.first().cloned() {
                    cycle.push(first);
                }
                return cycle;
            }
            path.push(next);
            current = next;
        }

        path.iter()
            .map(|&i| self.tasks[i].task_key().to_string())
            .collect()
    }
}

impl<T> IntoIterator for TaskSet<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a TaskSet<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}

impl<T: Serialize> Serialize for TaskSet<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.tasks.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for TaskSet<T>
where
    T: GraphTask + Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let tasks = Vec::<T>::deserialize(deserializer)?;
        TaskSet::link(tasks).map_err(de_error)
    }
}
