//! Kanban board state
//!
//! Four fixed columns mapped one-to-one onto [`TaskStatus`]. A move between
//! columns rewrites the task's status; reverting re-inserts the original
//! task object so a failed sync leaves no trace of the attempt.

use crate::models::{Task, TaskStatus};

/// The four board columns, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KanbanColumn {
    Todo,
    InProgress,
    Blocked,
    Done,
}

impl KanbanColumn {
    pub const ALL: [KanbanColumn; 4] = [
        KanbanColumn::Todo,
        KanbanColumn::InProgress,
        KanbanColumn::Blocked,
        KanbanColumn::Done,
    ];

    /// Column header shown on the board
    pub fn title(&self) -> &'static str {
        match self {
            KanbanColumn::Todo => "To Do",
            KanbanColumn::InProgress => "In Progress",
            KanbanColumn::Blocked => "Blocked",
            KanbanColumn::Done => "Done",
        }
    }

    /// Task status a card acquires when dropped into this column
    pub fn status(&self) -> TaskStatus {
        match self {
            KanbanColumn::Todo => TaskStatus::Todo,
            KanbanColumn::InProgress => TaskStatus::Doing,
            KanbanColumn::Blocked => TaskStatus::Blocked,
            KanbanColumn::Done => TaskStatus::Done,
        }
    }

    pub fn from_status(status: TaskStatus) -> Self {
        match status {
            TaskStatus::Todo => KanbanColumn::Todo,
            TaskStatus::Doing => KanbanColumn::InProgress,
            TaskStatus::Blocked => KanbanColumn::Blocked,
            TaskStatus::Done => KanbanColumn::Done,
        }
    }
}

/// A project's tasks bucketed into the four columns.
#[derive(Debug, Clone, PartialEq)]
pub struct KanbanBoard {
    columns: [Vec<Task>; 4],
}

impl KanbanBoard {
    /// Bucket tasks by status, preserving input order within each column.
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        let mut columns: [Vec<Task>; 4] = Default::default();
        for task in tasks {
            columns[Self::index(KanbanColumn::from_status(task.status))].push(task);
        }
        KanbanBoard { columns }
    }

    /// Tasks currently in `column`, in order.
    pub fn tasks(&self, column: KanbanColumn) -> &[Task] {
        &self.columns[Self::index(column)]
    }

    /// Move a task between columns, rewriting its status to match the
    /// destination.
    ///
    /// Returns the task as it was before the move (for a later
    /// [`revert_move`](Self::revert_move)), or `None` when `task_id` is not
    /// in `from`.
    pub fn apply_move(
        &mut self,
        task_id: &str,
        from: KanbanColumn,
        to: KanbanColumn,
    ) -> Option<Task> {
        let source = &mut self.columns[Self::index(from)];
        let position = source.iter().position(|t| t.id == task_id)?;
        let original = source.remove(position);

        let mut moved = original.clone();
        moved.status = to.status();
        self.columns[Self::index(to)].push(moved);

        Some(original)
    }

    /// Undo a move exactly: drop the task from `to` and re-append the
    /// original object to `from`.
    pub fn revert_move(&mut self, original: Task, from: KanbanColumn, to: KanbanColumn) {
        self.columns[Self::index(to)].retain(|t| t.id != original.id);
        self.columns[Self::index(from)].push(original);
    }

    fn index(column: KanbanColumn) -> usize {
        match column {
            KanbanColumn::Todo => 0,
            KanbanColumn::InProgress => 1,
            KanbanColumn::Blocked => 2,
            KanbanColumn::Done => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TaskPriority, TaskType};

    fn task(id: &str, status: TaskStatus) -> Task {
        Task {
            id: id.to_string(),
            title: format!("Task {id}"),
            description: None,
            priority: TaskPriority::Medium,
            task_type: TaskType::Other,
            status,
            project_id: "p1".to_string(),
            assigned_user: None,
        }
    }

    #[test]
    fn from_tasks_buckets_by_status() {
        let board = KanbanBoard::from_tasks(vec![
            task("a", TaskStatus::Todo),
            task("b", TaskStatus::Done),
            task("c", TaskStatus::Todo),
        ]);

        assert_eq!(board.tasks(KanbanColumn::Todo).len(), 2);
        assert_eq!(board.tasks(KanbanColumn::Done).len(), 1);
        assert!(board.tasks(KanbanColumn::Blocked).is_empty());
    }

    #[test]
    fn apply_move_rewrites_status() {
        let mut board = KanbanBoard::from_tasks(vec![task("a", TaskStatus::Todo)]);

        let original = board
            .apply_move("a", KanbanColumn::Todo, KanbanColumn::Done)
            .unwrap();

        assert_eq!(original.status, TaskStatus::Todo);
        assert!(board.tasks(KanbanColumn::Todo).is_empty());
        assert_eq!(board.tasks(KanbanColumn::Done)[0].status, TaskStatus::Done);
    }

    #[test]
    fn apply_move_missing_task_returns_none() {
        let mut board = KanbanBoard::from_tasks(vec![task("a", TaskStatus::Todo)]);
        assert!(board
            .apply_move("a", KanbanColumn::Blocked, KanbanColumn::Done)
            .is_none());
    }

    #[test]
    fn revert_restores_the_pre_move_board() {
        let before = KanbanBoard::from_tasks(vec![
            task("a", TaskStatus::Todo),
            task("b", TaskStatus::Todo),
        ]);
        let mut board = before.clone();

        let original = board
            .apply_move("a", KanbanColumn::Todo, KanbanColumn::Done)
            .unwrap();
        board.revert_move(original, KanbanColumn::Todo, KanbanColumn::Done);

        assert!(board.tasks(KanbanColumn::Done).is_empty());
        // "a" comes back at the end of its column, status untouched.
        let todo: Vec<_> = board.tasks(KanbanColumn::Todo).iter().map(|t| t.id.as_str()).collect();
        assert_eq!(todo, vec!["b", "a"]);
        assert_eq!(board.tasks(KanbanColumn::Todo)[1].status, TaskStatus::Todo);
    }
}
