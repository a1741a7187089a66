//! Smoke-test driver: replays a small edit history and prints the front
//! after each phase. Not part of the core design.

use retroq::{LogicalTime, RetroactiveQueue};

fn main() -> retroq::Result<()> {
    let mut q = RetroactiveQueue::new();

    q.enqueue(10); // t=100
    q.enqueue(20); // t=200
    q.enqueue(30); // t=300
    q.retro_insert_enqueue(LogicalTime::new(150), 15)?;
    q.retro_insert_enqueue(LogicalTime::new(175), 17)?;
    println!("front = {:?}", q.front());

    q.dequeue();
    q.retro_delete_enqueue(LogicalTime::new(175))?;
    println!("front = {:?}", q.front());

    q.dequeue();
    println!("front = {:?}", q.front());

    q.dequeue();
    q.dequeue();
    q.enqueue(40);
    println!("front = {:?}", q.front());

    Ok(())
}
