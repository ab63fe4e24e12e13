mod negotiator;
