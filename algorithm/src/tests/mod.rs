mod test_bounds;
