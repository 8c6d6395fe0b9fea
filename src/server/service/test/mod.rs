mod gadget;
