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

//! Job settings decoding, task linking and re-encoding.

use databricks_rest::types::jobs::{JobSettings, JobTask, NotebookTask, TaskPayload};
use databricks_rest::{Error, GraphTask};
use serde_json::{json, Value};

fn three_task_job() -> Value {
    json!({
        "name": "diamond",
        "tasks": [
            {"task_key": "A", "existing_cluster_id": "c1",
             "notebook_task": {"notebook_path": "/a"}},
            {"task_key": "B", "existing_cluster_id": "c1",
             "spark_python_task": {"python_file": "dbfs:/b.py", "parameters": ["--x"]}},
            {"task_key": "C", "depends_on": [{"task_key": "A"}, {"task_key": "B"}],
             "job_cluster_key": "shared",
             "notebook_task": {"notebook_path": "/c", "base_parameters": {"k": "v"}},
             "max_retries": 2}
        ],
        "format": "MULTI_TASK"
    })
}

fn edges(settings: &JobSettings) -> Vec<(String, Vec<String>)> {
    settings
        .tasks
        .iter()
        .map(|task| {
            let upstream = settings
                .tasks
                .dependencies_of(task.task_key())
                .unwrap()
                .into_iter()
                .map(|t| t.task_key.clone())
                .collect();
            (task.task_key.clone(), upstream)
        })
        .collect()
}

#[test]
fn test_decode_links_dependencies_to_sibling_tasks() {
    let settings: JobSettings = serde_json::from_value(three_task_job()).unwrap();
    let tasks = &settings.tasks;

    assert_eq!(tasks.len(), 3);
    let upstream = tasks.dependencies_of("C").unwrap();
    assert!(std::ptr::eq(upstream[0], tasks.get("A").unwrap()));
    assert!(std::ptr::eq(upstream[1], tasks.get("B").unwrap()));

    let downstream: Vec<&str> = tasks
        .dependents_of("A")
        .unwrap()
        .into_iter()
        .map(|t| t.task_key())
        .collect();
    assert_eq!(downstream, vec!["C"]);

    let roots: Vec<&str> = tasks.roots().into_iter().map(|t| t.task_key()).collect();
    assert_eq!(roots, vec!["A", "B"]);
}

#[test]
fn test_reencoding_is_stable() {
    let first: JobSettings = serde_json::from_value(three_task_job()).unwrap();
    let encoded = serde_json::to_string(&first).unwrap();
    let second: JobSettings = serde_json::from_str(&encoded).unwrap();
    let reencoded = serde_json::to_string(&second).unwrap();

    assert_eq!(encoded, reencoded);
    assert_eq!(first, second);
    assert_eq!(edges(&first), edges(&second));
    assert_eq!(serde_json::to_value(&second).unwrap(), three_task_job());
}

#[test]
fn test_execution_order_respects_dependencies() {
    let settings: JobSettings = serde_json::from_value(three_task_job()).unwrap();
    let order: Vec<&str> = settings
        .tasks
        .execution_order()
        .unwrap()
        .into_iter()
        .map(|t| t.task_key())
        .collect();
    assert_eq!(order.last(), Some(&"C"));
    assert_eq!(order.len(), 3);
}

#[test]
fn test_unknown_dependency_is_rejected() {
    let mut job = three_task_job();
    job["tasks"][2]["depends_on"] = json!([{"task_key": "A"}, {"task_key": "Z"}]);

    let err = serde_json::from_value::<JobSettings>(job).unwrap_err();
    assert!(
        err.to_string()
            .contains("task 'C' depends on unknown task 'Z'"),
        "{}",
        err
    );
}

#[test]
fn test_duplicate_key_is_rejected() {
    let mut job = three_task_job();
    job["tasks"][1]["task_key"] = json!("A");

    let err = serde_json::from_value::<JobSettings>(job).unwrap_err();
    assert!(err.to_string().contains("duplicate task key 'A'"), "{}", err);
}

#[test]
fn test_two_payloads_are_rejected() {
    let mut job = three_task_job();
    job["tasks"][0]["spark_jar_task"] = json!({"main_class_name": "Main"});

    let err = serde_json::from_value::<JobSettings>(job).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("notebook_task"), "{}", message);
    assert!(message.contains("spark_jar_task"), "{}", message);
}

#[test]
fn test_missing_payload_is_rejected() {
    let mut job = three_task_job();
    job["tasks"][0]
        .as_object_mut()
        .unwrap()
        .remove("notebook_task");

    let err = serde_json::from_value::<JobSettings>(job).unwrap_err();
    assert!(err.to_string().contains("found none"), "{}", err);
}

#[test]
fn test_cycle_is_reported_by_execution_order() {
    let tasks = vec![
        JobTask::new("A", TaskPayload::Notebook(NotebookTask::new("/a"))).with_dependencies(["B"]),
        JobTask::new("B", TaskPayload::Notebook(NotebookTask::new("/b"))).with_dependencies(["A"]),
    ];
    let settings = JobSettings::new("loop").with_tasks(tasks).unwrap();

    match settings.tasks.execution_order() {
        Err(Error::TaskCycle(keys)) => {
            assert_eq!(keys.first(), keys.last());
            assert!(keys.contains(&"A".to_string()));
            assert!(keys.contains(&"B".to_string()));
        }
        other => panic!("expected a cycle, got {:?}", other.map(|o| o.len())),
    }
}

#[test]
fn test_builder_rejects_unknown_dependency() {
    let tasks = vec![
        JobTask::new("A", TaskPayload::Notebook(NotebookTask::new("/a"))).with_dependencies(["X"]),
    ];
    let err = JobSettings::new("bad").with_tasks(tasks).unwrap_err();
    assert!(matches!(
        err,
        Error::UnresolvedTaskDependency { ref task, ref dependency }
            if task == "A" && dependency == "X"
    ));
}
