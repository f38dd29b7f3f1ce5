mod load_bad;
