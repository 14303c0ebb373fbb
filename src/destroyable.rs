// trait implemented when subscriptions hold Rc clones of their owner and we need to manually break the chain
pub trait Destroyable {
    fn destroy(&mut self);
}
