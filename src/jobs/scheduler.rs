use std::{sync::Arc, time::Duration};

use tokio::time::{interval, Instant};
use uuid::Uuid;

use crate::jobs::bus::CommandBus;
use crate::jobs::types::{JobMap, ScheduledJob};
use crate::vehicle::command::VehicleCommand;

/// One-shot command scheduler for a single vehicle.
///
/// Every job fires exactly once; a repeating probe is expressed by the
/// command re-arming itself when it runs. Handles are `Uuid`s so the owner of
/// a timer can cancel it on teardown.
pub struct Scheduler {
    pub(crate) jobs: JobMap,
}

impl Scheduler {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            jobs: JobMap::default(),
        })
    }

    pub async fn enqueue_after(self: &Arc<Self>, delay: Duration, cmd: VehicleCommand) -> Uuid {
        let id = Uuid::new_v4();
        let job = ScheduledJob {
            id,
            cmd,
            fire_at: Instant::now() + delay,
            active: true,
        };
        let mut map = self.jobs.lock().await;
        map.insert(id, job);
        id
    }

    pub async fn cancel(&self, id: Uuid) -> bool {
        let mut map = self.jobs.lock().await;
        if let Some(j) = map.get_mut(&id) {
            j.active = false;
            return true;
        }
        false
    }

    async fn take_due(&self) -> Vec<ScheduledJob> {
        let now = Instant::now();
        let mut map = self.jobs.lock().await;
        let ready_ids: Vec<_> = map
            .iter()
            .filter_map(|(id, j)| (now >= j.fire_at).then_some(*id))
            .collect();
        let mut due = Vec::with_capacity(ready_ids.len());
        for id in ready_ids {
            if let Some(j) = map.remove(&id) {
                if j.active {
                    due.push(j);
                }
            }
        }
        due
    }
}

/// Spawns the dispatch loop: due jobs are drained on a fixed tick and their
/// commands pushed onto the vehicle's command bus.
pub fn spawn_scheduler(bus: CommandBus) -> Arc<Scheduler> {
    let sched = Scheduler::new();
    let s = Arc::clone(&sched);

    tokio::spawn(async move {
        let mut tick = interval(Duration::from_millis(10));
        loop {
            tick.tick().await;
            let due = s.take_due().await;

            for job in due {
                if bus.enqueue(job.cmd).await.is_err() {
                    // Bus closed: the vehicle is gone, stop ticking.
                    return;
                }
            }
        }
    });

    sched
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_one_shot_fires_once_after_delay() {
        let sched = Scheduler::new();
        sched
            .enqueue_after(Duration::from_millis(20), VehicleCommand::StartBraking)
            .await;

        assert!(sched.take_due().await.is_empty());

        tokio::time::sleep(Duration::from_millis(30)).await;
        let due = sched.take_due().await;
        assert_eq!(due.len(), 1);

        // Fired jobs leave the map.
        assert!(sched.take_due().await.is_empty());
    }

    #[tokio::test]
    async fn test_cancelled_job_never_fires() {
        let sched = Scheduler::new();
        let id = sched
            .enqueue_after(Duration::from_millis(10), VehicleCommand::CheckDistance)
            .await;

        assert!(sched.cancel(id).await);

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(sched.take_due().await.is_empty());
    }

    #[tokio::test]
    async fn test_cancel_unknown_job_is_false() {
        let sched = Scheduler::new();
        assert!(!sched.cancel(Uuid::new_v4()).await);
    }
}
