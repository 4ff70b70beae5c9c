fn main() { lazymat_tasks::entry_points::chain() }
