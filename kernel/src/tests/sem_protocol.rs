// 测试：wait / signal 协议
//
// 使用协作式调度器逐步检查：
// 1. 阻塞/唤醒的精确性（value 与等待队列的对应关系）
// 2. FIFO 唤醒顺序
// 3. 计数守恒：k 次 wait、m 次 signal 后 value == v0 - k + m
// 4. wait 总是让出 CPU，signal 从不让出
// 5. 不存在的信号量返回 NotFound

use super::{coop_manager, CoopScheduler};
use crate::ipc::sem::SemError;
use crate::process::task::TaskState;

#[test]
fn test_block_wake_exactness() {
    let sched = CoopScheduler::new();
    let sems = coop_manager(&sched, 4);
    let id = sems.create(1, "s", 1).unwrap();

    // A: value 1 -> 0，不阻塞
    sched.run_as(10);
    sems.wait(1, "s").unwrap();
    assert_eq!(sems.value(id), Ok(0));
    assert_eq!(sched.state(10), Some(TaskState::Running));
    assert!(sems.waiters(id).unwrap().is_empty());

    // B: value 0 -> -1，阻塞
    sched.run_as(11);
    sems.wait(1, "s").unwrap();
    assert_eq!(sems.value(id), Ok(-1));
    assert_eq!(sched.state(11), Some(TaskState::Blocked));
    assert_eq!(sems.waiters(id), Ok(alloc::vec![11]));
    assert!(sched.ready_queue().is_empty());

    // signal: value -1 -> 0，B 出队并进入就绪队列
    sched.run_as(10);
    assert_eq!(sems.signal(1, "s"), Ok(Some(11)));
    assert_eq!(sems.value(id), Ok(0));
    assert!(sems.waiters(id).unwrap().is_empty());
    assert_eq!(sched.state(11), Some(TaskState::Ready));
    assert_eq!(sched.ready_queue(), alloc::vec![11]);
}

#[test]
fn test_fifo_wake_order() {
    let sched = CoopScheduler::new();
    let sems = coop_manager(&sched, 4);
    let id = sems.create(1, "fifo", 0).unwrap();

    for pid in [2, 3, 4] {
        sched.run_as(pid);
        sems.wait(1, "fifo").unwrap();
    }
    assert_eq!(sems.value(id), Ok(-3));
    assert_eq!(sems.waiters(id), Ok(alloc::vec![2, 3, 4]));

    sched.run_as(1);
    assert_eq!(sems.signal(1, "fifo"), Ok(Some(2)));
    assert_eq!(sems.signal(1, "fifo"), Ok(Some(3)));
    assert_eq!(sems.signal(1, "fifo"), Ok(Some(4)));
    assert_eq!(sched.ready_queue(), alloc::vec![2, 3, 4]);

    // 没有等待者时只增加计数
    assert_eq!(sems.signal(1, "fifo"), Ok(None));
    assert_eq!(sems.value(id), Ok(1));
}

#[test]
fn test_counter_law() {
    let sched = CoopScheduler::new();
    let sems = coop_manager(&sched, 4);
    let v0 = 2;
    let id = sems.create(5, "count", v0).unwrap();

    // 交错的 wait/signal 序列，每个 wait 由不同的进程发出
    let script = "wwswwwsswsww";
    let mut next_pid = 100;
    let (mut k, mut m) = (0, 0);
    for op in script.chars() {
        match op {
            'w' => {
                sched.run_as(next_pid);
                next_pid += 1;
                sems.wait(5, "count").unwrap();
                k += 1;
            }
            _ => {
                sems.signal(5, "count").unwrap();
                m += 1;
            }
        }

        let stat = sems.stat(id).unwrap();
        assert_eq!(stat.value, v0 - k + m);
        let expected_waiters = (-stat.value).max(0) as usize;
        assert_eq!(stat.waiters.len(), expected_waiters, "|wait queue| == max(0, -value)");
    }
}

#[test]
fn test_wait_always_yields_signal_never_does() {
    let sched = CoopScheduler::new();
    let sems = coop_manager(&sched, 4);
    sems.create(1, "y", 5).unwrap();

    sched.run_as(1);
    sems.wait(1, "y").unwrap();
    assert_eq!(sched.yields(), 1, "non-blocking wait is still a preemption point");
    assert_eq!(sched.state(1), Some(TaskState::Running));

    sems.signal(1, "y").unwrap();
    sems.signal(1, "y").unwrap();
    assert_eq!(sched.yields(), 1, "signal does not yield");
}

#[test]
fn test_missing_semaphore_is_reported() {
    let sched = CoopScheduler::new();
    let sems = coop_manager(&sched, 4);
    let id = sems.create(1, "real", 0).unwrap();

    sched.run_as(3);
    assert_eq!(sems.wait(1, "ghost"), Err(SemError::NotFound));
    assert_eq!(sems.wait(2, "real"), Err(SemError::NotFound), "name is scoped by owner");
    assert_eq!(sems.signal(1, "ghost"), Err(SemError::NotFound));

    assert_eq!(sched.yields(), 0, "failed wait does not yield");
    assert_eq!(sched.state(3), Some(TaskState::Running));
    assert_eq!(sems.value(id), Ok(0));
    assert!(sched.ready_queue().is_empty());
}

#[test]
fn test_signal_after_free_is_not_found() {
    let sched = CoopScheduler::new();
    let sems = coop_manager(&sched, 4);
    let id = sems.create(1, "once", 0).unwrap();
    sems.free(id).unwrap();

    assert_eq!(sems.signal(1, "once"), Err(SemError::NotFound));
    assert_eq!(sems.wait(1, "once"), Err(SemError::NotFound));
}

#[test]
fn test_independent_semaphores() {
    let sched = CoopScheduler::new();
    let sems = coop_manager(&sched, 4);
    let a = sems.create(1, "a", 0).unwrap();
    let b = sems.create(1, "b", 0).unwrap();

    sched.run_as(2);
    sems.wait(1, "a").unwrap();
    sched.run_as(3);
    sems.wait(1, "b").unwrap();

    assert_eq!(sems.signal(1, "b"), Ok(Some(3)));
    assert_eq!(sems.waiters(a), Ok(alloc::vec![2]));
    assert_eq!(sems.value(a), Ok(-1));
    assert_eq!(sems.value(b), Ok(0));
}
